use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;
use werkstatt_api::{ApiConfig, FileUpload, WerkstattApi, connect, sanitize_filename};
use werkstatt_types::PluginDescriptor;
use werkstatt_util::{build_args, expand_tilde, render_output};

/// Plugin workbench for the Werkstatt backend. Without a command the
/// interactive shell starts.
#[derive(Debug, Parser)]
#[command(name = "werkstatt", version, about)]
struct Cli {
    /// Backend base URL (overrides WERKSTATT_API_BASE)
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Use the in-memory mock backend
    #[arg(long, global = true, conflicts_with = "no_mock")]
    mock: bool,

    /// Use the HTTP backend even when WERKSTATT_USE_MOCK is set
    #[arg(long, global = true)]
    no_mock: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn mock_override(&self) -> Option<bool> {
        match (self.mock, self.no_mock) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered plugins
    Plugins {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a plugin command
    Run(RunArgs),
    /// Upload a file
    Upload { path: String },
    /// Print the download URL of an uploaded file
    Url { filename: String },
    /// Fetch an uploaded file
    Download {
        filename: String,
        /// Target path; defaults to the filename in the current directory
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    plugin: String,
    command: String,
    /// Argument as key=value; repeatable
    #[arg(long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,
    /// Arguments as a JSON object, applied before --arg pairs
    #[arg(long, value_name = "JSON")]
    args_json: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let shell = cli.command.is_none();
    if shell {
        init_file_tracing();
    } else {
        init_tracing();
    }

    let config = ApiConfig::resolve(cli.api_base.clone(), cli.mock_override()).context("invalid API configuration")?;
    info!(base_url = %config.base_url, mock = config.use_mock, "resolved API configuration");
    let api = connect(&config)?;

    match cli.command {
        None => werkstatt_tui::run(api).await,
        Some(command) => run_command(api, command).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// The shell owns the terminal, so logs go to a file. Without a usable file
/// there is no logging at all.
fn init_file_tracing() {
    let Ok((_path, file)) = werkstatt_tui::log_persistence::open_log_file() else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("werkstatt=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

async fn run_command(api: Arc<dyn WerkstattApi>, command: Command) -> Result<()> {
    match command {
        Command::Plugins { json } => {
            let plugins = api.get_plugins().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plugins)?);
            } else {
                print!("{}", format_plugin_table(&plugins));
            }
        }
        Command::Run(run) => {
            let args = build_args(run.args_json.as_deref(), &run.args)?;
            debug!(plugin = %run.plugin, command = %run.command, "running command");
            let output = api.run_command(&run.plugin, &run.command, &args).await?;
            println!("{}", render_output(&output));
        }
        Command::Upload { path } => {
            let file = FileUpload::from_path(expand_tilde(&path)).await?;
            let uploaded = api.upload_file(file).await?;
            println!("{}\t{}", uploaded.filename, uploaded.url);
        }
        Command::Url { filename } => {
            println!("{}", api.get_download_url(&filename).await?);
        }
        Command::Download { filename, output } => {
            let target = output.unwrap_or_else(|| PathBuf::from(sanitize_filename(&filename)));
            download_to(api.as_ref(), &filename, &target).await?;
            println!("{}", target.display());
        }
    }
    Ok(())
}

async fn download_to(api: &dyn WerkstattApi, filename: &str, target: &std::path::Path) -> Result<()> {
    let url = api.get_download_url(filename).await?;
    let bytes = api.download(&url).await?;
    tokio::fs::write(target, &bytes)
        .await
        .with_context(|| format!("writing {}", target.display()))?;
    Ok(())
}

/// Columns: name, enabled, version, description.
fn format_plugin_table(plugins: &[PluginDescriptor]) -> String {
    if plugins.is_empty() {
        return "No plugins registered.\n".to_string();
    }
    let header = ["NAME", "ENABLED", "VERSION", "DESCRIPTION"].map(String::from);
    let rows: Vec<[String; 4]> = plugins
        .iter()
        .map(|plugin| {
            [
                plugin.name.clone(),
                if plugin.enabled { "yes" } else { "no" }.to_string(),
                plugin.version.clone().filter(|version| !version.is_empty()).unwrap_or_else(|| "?".to_string()),
                plugin.summary().unwrap_or_default().to_string(),
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in std::iter::once(&header).chain(&rows) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(widths) {
            line.push_str(cell);
            line.push_str(&" ".repeat(width - cell.width() + 2));
        }
        line.push_str(&row[3]);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
