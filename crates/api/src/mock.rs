//! In-memory stand-in for the backend, used for offline and demo operation.
//!
//! The registry holds a single `example` plugin with `greet` and `echo`.
//! Every upload stores its bytes under a new `blob:` URL, and the name maps to
//! the URL of its latest upload. Retrievals hand out that URL, so the blob map
//! only grows with uploads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;
use werkstatt_types::{CommandArgs, CommandDescriptor, CommandParam, PluginDescriptor, UploadResult, value_to_text};

use crate::{ApiError, BackendKind, FileUpload, WerkstattApi};

pub const EXAMPLE_PLUGIN: &str = "example";
const BLOB_PREFIX: &str = "blob:werkstatt-mock/";
const DEFAULT_GREETEE: &str = "Welt";

#[derive(Debug, Clone)]
struct StoredFile {
    content_type: String,
    bytes: Arc<[u8]>,
}

#[derive(Debug, Default)]
struct FileStore {
    /// Filename to the blob URL of its latest upload.
    files: HashMap<String, String>,
    blobs: HashMap<String, StoredFile>,
    next_blob: u64,
}

impl FileStore {
    fn issue_blob(&mut self, file: StoredFile) -> String {
        self.next_blob += 1;
        let url = format!("{BLOB_PREFIX}{}", self.next_blob);
        self.blobs.insert(url.clone(), file);
        url
    }
}

#[derive(Debug)]
pub struct MockBackend {
    plugins: Vec<PluginDescriptor>,
    store: Mutex<FileStore>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            plugins: vec![example_plugin()],
            store: Mutex::new(FileStore::default()),
        }
    }

    /// MIME type recorded for a blob URL handed out earlier.
    pub fn blob_content_type(&self, url: &str) -> Option<String> {
        self.store().blobs.get(url).map(|file| file.content_type.clone())
    }

    fn store(&self) -> MutexGuard<'_, FileStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WerkstattApi for MockBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Mock
    }

    async fn get_plugins(&self) -> Result<Vec<PluginDescriptor>, ApiError> {
        Ok(self.plugins.clone())
    }

    async fn run_command(&self, plugin: &str, command: &str, args: &CommandArgs) -> Result<Value, ApiError> {
        debug!(plugin, command, "mock run");
        if plugin != EXAMPLE_PLUGIN {
            return Err(ApiError::PluginNotFound {
                plugin: plugin.to_string(),
            });
        }
        match command {
            "greet" => {
                let name = args
                    .get("name")
                    .filter(|value| !value.is_null())
                    .map(value_to_text)
                    .unwrap_or_else(|| DEFAULT_GREETEE.to_string());
                Ok(Value::String(format!("Hallo, {name}!")))
            }
            "echo" => {
                let message = args.get("msg").ok_or_else(|| ApiError::MissingArgument("msg".to_string()))?;
                Ok(Value::String(value_to_text(message)))
            }
            _ => Err(ApiError::CommandNotFound {
                plugin: plugin.to_string(),
                command: command.to_string(),
            }),
        }
    }

    async fn upload_file(&self, file: FileUpload) -> Result<UploadResult, ApiError> {
        let (filename, content_type, bytes) = file.into_parts();
        debug!(%filename, size = bytes.len(), "mock upload");
        let stored = StoredFile {
            content_type,
            bytes: Arc::from(bytes),
        };
        let mut store = self.store();
        let url = store.issue_blob(stored);
        store.files.insert(filename.clone(), url.clone());
        Ok(UploadResult { filename, url })
    }

    async fn get_download_url(&self, filename: &str) -> Result<String, ApiError> {
        self.store().files.get(filename).cloned().ok_or_else(|| ApiError::FileNotFound {
            filename: filename.to_string(),
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        self.store()
            .blobs
            .get(url)
            .map(|file| file.bytes.to_vec())
            .ok_or_else(|| ApiError::FileNotFound { filename: url.to_string() })
    }
}

fn example_plugin() -> PluginDescriptor {
    PluginDescriptor {
        name: EXAMPLE_PLUGIN.to_string(),
        version: Some("0.1.0".to_string()),
        description: Some("Beispiel-Tool: Begrüßung und Echo (MOCK)".to_string()),
        enabled: true,
        commands: vec![
            CommandDescriptor {
                name: "greet".to_string(),
                description: Some("Gibt eine Begrüßung aus.".to_string()),
                params: vec![CommandParam {
                    name: "name".to_string(),
                    param_type: Some("string".to_string()),
                    required: false,
                    description: Some("Name zum Grüßen".to_string()),
                    default: Some(json!(DEFAULT_GREETEE)),
                }],
            },
            CommandDescriptor {
                name: "echo".to_string(),
                description: Some("Gibt die Nachricht 1:1 zurück.".to_string()),
                params: vec![CommandParam {
                    name: "msg".to_string(),
                    param_type: Some("string".to_string()),
                    required: true,
                    description: Some("Nachricht".to_string()),
                    default: None,
                }],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, Value)]) -> CommandArgs {
        pairs.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
    }

    #[tokio::test]
    async fn lists_exactly_the_example_plugin() {
        let mock = MockBackend::new();
        let plugins = mock.get_plugins().await.unwrap();
        assert_eq!(plugins.len(), 1);
        let plugin = &plugins[0];
        assert_eq!(plugin.name, "example");
        assert!(plugin.enabled);
        let commands: Vec<_> = plugin.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(commands, vec!["greet", "echo"]);
        let msg = plugin.find_command("echo").and_then(|c| c.find_param("msg")).unwrap();
        assert!(msg.required);
    }

    #[tokio::test]
    async fn listing_returns_independent_copies() {
        let mock = MockBackend::new();
        let mut first = mock.get_plugins().await.unwrap();
        first[0].commands.clear();
        let second = mock.get_plugins().await.unwrap();
        assert_eq!(second[0].commands.len(), 2);
    }

    #[tokio::test]
    async fn greet_defaults_to_welt() {
        let mock = MockBackend::new();
        let output = mock.run_command("example", "greet", &CommandArgs::new()).await.unwrap();
        assert_eq!(output, json!("Hallo, Welt!"));

        let output = mock.run_command("example", "greet", &args(&[("name", json!("Ana"))])).await.unwrap();
        assert_eq!(output, json!("Hallo, Ana!"));

        let output = mock.run_command("example", "greet", &args(&[("name", Value::Null)])).await.unwrap();
        assert_eq!(output, json!("Hallo, Welt!"));
    }

    #[tokio::test]
    async fn echo_requires_msg() {
        let mock = MockBackend::new();
        let output = mock.run_command("example", "echo", &args(&[("msg", json!("hi"))])).await.unwrap();
        assert_eq!(output, json!("hi"));

        let output = mock.run_command("example", "echo", &args(&[("msg", json!(7))])).await.unwrap();
        assert_eq!(output, json!("7"));

        let error = mock.run_command("example", "echo", &CommandArgs::new()).await.unwrap_err();
        assert!(matches!(error, ApiError::MissingArgument(ref name) if name == "msg"));
        assert!(error.to_string().contains("msg"), "message should name the argument: {error}");
    }

    #[tokio::test]
    async fn unknown_plugin_and_command_fail() {
        let mock = MockBackend::new();
        let error = mock.run_command("other", "x", &CommandArgs::new()).await.unwrap_err();
        assert!(matches!(error, ApiError::PluginNotFound { .. }));
        assert_eq!(error.to_string(), "Plugin not found");

        let error = mock.run_command("example", "shout", &CommandArgs::new()).await.unwrap_err();
        assert!(matches!(error, ApiError::CommandNotFound { .. }));
        assert_eq!(error.to_string(), "Command not found");
    }

    #[tokio::test]
    async fn uploaded_bytes_are_served_by_download_url() {
        let mock = MockBackend::new();
        let upload = FileUpload::new("notes.txt", b"erste Fassung".to_vec()).with_content_type("text/plain");
        let result = mock.upload_file(upload).await.unwrap();
        assert_eq!(result.filename, "notes.txt");
        assert!(result.is_blob());
        assert_eq!(mock.download(&result.url).await.unwrap(), b"erste Fassung");

        let url = mock.get_download_url("notes.txt").await.unwrap();
        assert_eq!(url, result.url);
        assert_eq!(mock.download(&url).await.unwrap(), b"erste Fassung");
        assert_eq!(mock.blob_content_type(&url).as_deref(), Some("text/plain"));
    }

    #[tokio::test]
    async fn reupload_replaces_file_but_not_issued_blobs() {
        let mock = MockBackend::new();
        let first = mock.upload_file(FileUpload::new("a.txt", b"v1".to_vec())).await.unwrap();
        mock.upload_file(FileUpload::new("a.txt", b"v2".to_vec())).await.unwrap();

        let latest = mock.get_download_url("a.txt").await.unwrap();
        assert_eq!(mock.download(&latest).await.unwrap(), b"v2");
        assert_eq!(mock.download(&first.url).await.unwrap(), b"v1");
    }

    #[tokio::test]
    async fn repeated_lookups_reuse_the_upload_url() {
        let mock = MockBackend::new();
        let uploaded = mock.upload_file(FileUpload::new("a.txt", b"v1".to_vec())).await.unwrap();
        for _ in 0..5 {
            assert_eq!(mock.get_download_url("a.txt").await.unwrap(), uploaded.url);
        }
        assert_eq!(mock.store().blobs.len(), 1);

        let second = mock.upload_file(FileUpload::new("b.txt", b"b".to_vec())).await.unwrap();
        assert_eq!(second.url, "blob:werkstatt-mock/2");
        assert_eq!(mock.store().blobs.len(), 2);
    }

    #[tokio::test]
    async fn unknown_files_fail() {
        let mock = MockBackend::new();
        let error = mock.get_download_url("never.txt").await.unwrap_err();
        assert!(matches!(error, ApiError::FileNotFound { ref filename } if filename == "never.txt"));
        assert_eq!(error.to_string(), "File not found");
        assert!(mock.download("blob:werkstatt-mock/99").await.is_err());
    }
}
