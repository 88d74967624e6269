//! Shared data model for the Werkstatt client.
//!
//! Descriptors mirror what the backend reports from `GET /plugins`. They are
//! immutable value objects; the UI keeps a transient copy per request. The
//! wire bodies for the remaining endpoints live in [`wire`], and the message
//! vocabulary of the terminal shell lives in [`shell`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod shell;
pub mod wire;

pub use shell::{Effect, ExecOutcome, Msg};

/// Arguments passed to a command, keyed by parameter name in entry order.
pub type CommandArgs = IndexMap<String, Value>;

/// A backend-registered plugin and the commands it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique plugin name (e.g., "example")
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Disabled plugins are listed but cannot be selected
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
}

fn default_enabled() -> bool {
    true
}

impl PluginDescriptor {
    pub fn find_command(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Name followed by `v<version>` when a version is known.
    pub fn title(&self) -> String {
        match self.version.as_deref().filter(|version| !version.is_empty()) {
            Some(version) => format!("{} v{}", self.name, version),
            None => self.name.clone(),
        }
    }

    /// Description with empty strings treated as absent.
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }
}

/// A named operation within a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered parameter list used to build the input form
    #[serde(default)]
    pub params: Vec<CommandParam>,
}

impl CommandDescriptor {
    pub fn summary(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn find_param(&self, name: &str) -> Option<&CommandParam> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// A single command parameter as declared by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandParam {
    pub name: String,
    /// Type tag (e.g., "string"); coercion is left to the backend
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl CommandParam {
    /// Form label: the name, with ` *` appended for required parameters.
    pub fn label(&self) -> String {
        if self.required {
            format!("{} *", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// The default rendered as form text; empty when no default is declared.
    pub fn default_text(&self) -> String {
        match &self.default {
            None | Some(Value::Null) => String::new(),
            Some(value) => value_to_text(value),
        }
    }
}

/// Where an uploaded file can be retrieved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    /// Either an in-memory `blob:` reference or a backend download URL
    pub url: String,
}

impl UploadResult {
    pub fn is_blob(&self) -> bool {
        is_blob_url(&self.url)
    }
}

/// Blob URLs are served by the in-memory mock and never refreshed.
pub fn is_blob_url(url: &str) -> bool {
    url.starts_with("blob:")
}

/// Strings verbatim, every other JSON value in its compact form.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|value| !value.trim().is_empty())
}
