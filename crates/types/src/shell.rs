//! Message vocabulary of the terminal shell.
//!
//! The shell follows a functional-core layout: [`Msg`] values update state,
//! state updates emit [`Effect`]s, and the runtime turns effects into async
//! API calls whose results come back as [`ExecOutcome`].

use std::path::PathBuf;

use serde_json::Value;

use crate::{CommandArgs, PluginDescriptor, UploadResult};

/// Inputs that can change the shell state.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Pick a plugin from the list; ignored for disabled plugins
    SelectPlugin(String),
    /// Pick a command of the selected plugin
    SelectCommand(String),
    /// Replace the value of a form field
    EditArg { name: String, value: String },
    /// Execute the selected command with the edited arguments
    Run,
    /// Upload the file at the given path
    Upload(String),
    /// Download the entry at this index of the file list. Entries can share a
    /// name, each keeps its own URL.
    Download(usize),
    /// Periodic UI tick (throbber)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Background call completed with outcome
    ExecCompleted(Box<ExecOutcome>),
}

/// Side effects requested by state updates.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the plugin registry
    LoadPlugins,
    RunCommand {
        plugin: String,
        command: String,
        args: CommandArgs,
    },
    UploadFile(PathBuf),
    /// Fetch a file and store it in the download directory. `blob_url` is set
    /// when the recorded URL can be fetched as is.
    DownloadFile { filename: String, blob_url: Option<String> },
}

/// Result of a background API call. Failures carry the display message.
#[derive(Debug, Clone)]
pub enum ExecOutcome {
    PluginsLoaded(Result<Vec<PluginDescriptor>, String>),
    CommandFinished(Result<Value, String>),
    FileUploaded(Result<UploadResult, String>),
    FileDownloaded {
        filename: String,
        result: Result<PathBuf, String>,
    },
}

impl ExecOutcome {
    /// Operation label used in status lines.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::PluginsLoaded(_) => "plugins",
            Self::CommandFinished(_) => "run",
            Self::FileUploaded(_) => "upload",
            Self::FileDownloaded { .. } => "download",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::PluginsLoaded(Err(error))
            | Self::CommandFinished(Err(error))
            | Self::FileUploaded(Err(error))
            | Self::FileDownloaded { result: Err(error), .. } => Some(error),
            _ => None,
        }
    }
}
