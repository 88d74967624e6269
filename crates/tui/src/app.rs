//! Application state and logic for the Werkstatt shell.
//!
//! [`App`] holds everything the terminal shows: the plugin registry, the
//! current plugin/command selection, the argument form, the last output or
//! error and the uploaded files. [`App::update`] applies a [`Msg`] and returns
//! the [`Effect`]s the runtime should execute; it never performs I/O itself.
//!
//! Completions are applied in the order they arrive. There is no request-id
//! guarding, so when two calls overlap the one that resolves last wins.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde_json::Value;
use werkstatt_api::BackendKind;
use werkstatt_types::{
    CommandArgs, CommandDescriptor, CommandParam, Effect, ExecOutcome, Msg, PluginDescriptor, UploadResult, is_blob_url,
};
use werkstatt_util::{expand_tilde, render_output, summarize_outcome};

use crate::ui::components::common::TextInputState;
use crate::ui::theme::{self, Theme};

/// Frames of the busy indicator shown while a call is in flight.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Where the shell currently is in its plugin → command → run flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellPhase {
    NoPluginSelected,
    PluginSelected,
    CommandSelected,
    Running,
    ResultShown,
    ErrorShown,
}

/// Panel that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Plugins,
    Commands,
    Form,
    Upload,
    Files,
}

impl Focus {
    const ORDER: [Focus; 5] = [Focus::Plugins, Focus::Commands, Focus::Form, Focus::Upload, Focus::Files];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|focus| *focus == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// An uploaded file as listed in the files panel.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub filename: String,
    pub url: String,
    pub uploaded_at: DateTime<Local>,
}

impl FileEntry {
    fn from_upload(result: UploadResult) -> Self {
        Self {
            filename: result.filename,
            url: result.url,
            uploaded_at: Local::now(),
        }
    }
}

/// A form field being edited.
#[derive(Debug, Clone)]
pub struct FieldEditor {
    pub name: String,
    pub input: TextInputState,
}

#[derive(Debug)]
pub struct App {
    /// Implementation serving the API calls
    pub backend: BackendKind,
    pub theme: Box<dyn Theme>,

    pub plugins: Vec<PluginDescriptor>,
    pub loading_plugins: bool,
    selected_plugin: Option<String>,
    selected_command: Option<String>,
    /// Only parameters the user touched, in edit order
    args: IndexMap<String, String>,
    pub running: bool,
    pub output: Option<String>,
    pub error: Option<String>,
    /// Newest first
    pub files: Vec<FileEntry>,
    /// Summary of the last completed operation
    pub status: Option<String>,

    pub focus: Focus,
    pub plugin_cursor: usize,
    pub command_cursor: usize,
    /// Index into the form rows; `params.len()` is the run button
    pub field_cursor: usize,
    pub file_cursor: usize,
    pub editor: Option<FieldEditor>,
    pub upload_input: TextInputState,
    pub throbber_idx: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            theme: theme::load(),
            plugins: Vec::new(),
            loading_plugins: false,
            selected_plugin: None,
            selected_command: None,
            args: IndexMap::new(),
            running: false,
            output: None,
            error: None,
            files: Vec::new(),
            status: None,
            focus: Focus::default(),
            plugin_cursor: 0,
            command_cursor: 0,
            field_cursor: 0,
            file_cursor: 0,
            editor: None,
            upload_input: TextInputState::new(),
            throbber_idx: 0,
            should_quit: false,
        }
    }

    /// Effects to run once the event loop is up.
    pub fn initial_effects(&mut self) -> Vec<Effect> {
        self.loading_plugins = true;
        vec![Effect::LoadPlugins]
    }

    pub fn phase(&self) -> ShellPhase {
        if self.running {
            ShellPhase::Running
        } else if self.error.is_some() {
            ShellPhase::ErrorShown
        } else if self.output.is_some() {
            ShellPhase::ResultShown
        } else if self.selected_command.is_some() {
            ShellPhase::CommandSelected
        } else if self.selected_plugin.is_some() {
            ShellPhase::PluginSelected
        } else {
            ShellPhase::NoPluginSelected
        }
    }

    /// True while any call the user waits on is in flight.
    pub fn is_busy(&self) -> bool {
        self.running || self.loading_plugins
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.throbber_idx % SPINNER_FRAMES.len()]
    }

    pub fn selected_plugin(&self) -> Option<&PluginDescriptor> {
        let name = self.selected_plugin.as_deref()?;
        self.plugins.iter().find(|plugin| plugin.name == name)
    }

    pub fn selected_command(&self) -> Option<&CommandDescriptor> {
        let name = self.selected_command.as_deref()?;
        self.selected_plugin()?.find_command(name)
    }

    /// Parameters of the selected command, empty when none is selected.
    pub fn params(&self) -> &[CommandParam] {
        self.selected_command().map(|command| command.params.as_slice()).unwrap_or_default()
    }

    /// Edited value if any, else the declared default, else empty.
    pub fn displayed_value(&self, param: &CommandParam) -> String {
        match self.args.get(&param.name) {
            Some(value) => value.clone(),
            None => param.default_text(),
        }
    }

    pub fn is_edited(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// The arguments a run sends: edited parameters only, as strings.
    pub fn run_args(&self) -> CommandArgs {
        self.args.iter().map(|(name, value)| (name.clone(), Value::String(value.clone()))).collect()
    }

    pub fn can_run(&self) -> bool {
        !self.running && self.selected_command().is_some()
    }

    /// Open the form field under the cursor for editing, starting from its
    /// displayed value. Returns false when the cursor is on the run button.
    pub fn begin_edit(&mut self) -> bool {
        let Some(param) = self.params().get(self.field_cursor) else {
            return false;
        };
        let mut input = TextInputState::new();
        input.set_input(self.displayed_value(param));
        input.set_cursor(usize::MAX);
        self.editor = Some(FieldEditor {
            name: param.name.clone(),
            input,
        });
        true
    }

    /// True when keys go into a text input instead of panel navigation.
    pub fn is_text_input_active(&self) -> bool {
        self.editor.is_some() || self.focus == Focus::Upload
    }

    /// Process a message and return the side effects to run.
    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::SelectPlugin(name) => self.select_plugin(&name),
            Msg::SelectCommand(name) => self.select_command(&name),
            Msg::EditArg { name, value } => {
                self.args.insert(name, value);
            }
            Msg::Run => return self.start_run(),
            Msg::Upload(path) => {
                let path = path.trim();
                if !path.is_empty() {
                    return vec![Effect::UploadFile(expand_tilde(path))];
                }
            }
            Msg::Download(index) => return self.start_download(index),
            Msg::Tick => {
                if self.is_busy() {
                    self.throbber_idx = (self.throbber_idx + 1) % SPINNER_FRAMES.len();
                }
            }
            Msg::Resize(_, _) => {}
            Msg::ExecCompleted(outcome) => self.apply_outcome(*outcome),
        }
        Vec::new()
    }

    fn select_plugin(&mut self, name: &str) {
        let Some(index) = self.plugins.iter().position(|plugin| plugin.name == name) else {
            return;
        };
        let plugin = &self.plugins[index];
        if !plugin.enabled {
            return;
        }
        let first_command = plugin.commands.first().map(|command| command.name.clone());
        self.selected_plugin = Some(plugin.name.clone());
        self.plugin_cursor = index;
        self.clear_form();
        self.selected_command = first_command;
        self.command_cursor = 0;
    }

    fn select_command(&mut self, name: &str) {
        let Some(index) = self
            .selected_plugin()
            .and_then(|plugin| plugin.commands.iter().position(|command| command.name == name))
        else {
            return;
        };
        self.clear_form();
        self.selected_command = Some(name.to_string());
        self.command_cursor = index;
    }

    fn clear_form(&mut self) {
        self.selected_command = None;
        self.args.clear();
        self.output = None;
        self.error = None;
        self.editor = None;
        self.field_cursor = 0;
    }

    fn start_run(&mut self) -> Vec<Effect> {
        if self.running {
            return Vec::new();
        }
        let (Some(plugin), Some(command)) = (self.selected_plugin.clone(), self.selected_command().map(|c| c.name.clone())) else {
            return Vec::new();
        };
        self.running = true;
        self.throbber_idx = 0;
        self.output = None;
        self.error = None;
        vec![Effect::RunCommand {
            plugin,
            command,
            args: self.run_args(),
        }]
    }

    fn start_download(&self, index: usize) -> Vec<Effect> {
        let Some(entry) = self.files.get(index) else {
            return Vec::new();
        };
        vec![Effect::DownloadFile {
            filename: entry.filename.clone(),
            blob_url: is_blob_url(&entry.url).then(|| entry.url.clone()),
        }]
    }

    fn apply_outcome(&mut self, outcome: ExecOutcome) {
        self.status = Some(summarize_outcome(outcome.operation(), outcome.error()));
        match outcome {
            ExecOutcome::PluginsLoaded(result) => {
                self.loading_plugins = false;
                match result {
                    Ok(plugins) => self.set_plugins(plugins),
                    Err(error) => self.error = Some(error),
                }
            }
            ExecOutcome::CommandFinished(result) => {
                self.running = false;
                match result {
                    Ok(output) => self.output = Some(render_output(&output)),
                    Err(error) => self.error = Some(error),
                }
            }
            ExecOutcome::FileUploaded(result) => match result {
                Ok(uploaded) => {
                    self.files.insert(0, FileEntry::from_upload(uploaded));
                    self.file_cursor = 0;
                }
                Err(error) => self.error = Some(error),
            },
            ExecOutcome::FileDownloaded { result: Ok(path), .. } => {
                if let Some(status) = self.status.as_mut() {
                    status.push_str(&format!(" → {}", path.display()));
                }
            }
            ExecOutcome::FileDownloaded { result: Err(_), .. } => {}
        }
    }

    fn set_plugins(&mut self, plugins: Vec<PluginDescriptor>) {
        self.plugins = plugins;
        self.plugin_cursor = self.plugin_cursor.min(self.plugins.len().saturating_sub(1));
        if self.selected_plugin().is_none_or(|plugin| !plugin.enabled) {
            self.selected_plugin = None;
            self.clear_form();
        }
    }
}
