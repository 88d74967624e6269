//! Request and response bodies of the backend REST contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CommandArgs, value_to_text};

/// Body of `POST /run/{plugin}/{command}`.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest<'a> {
    pub args: &'a CommandArgs,
}

/// Success body of `POST /run/{plugin}/{command}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub output: Value,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    /// The backend message, if the body carried a usable one.
    ///
    /// Validation failures report `detail` as a structure rather than a
    /// string; those are passed through in compact JSON form.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            other => Some(value_to_text(other)),
        }
    }
}

/// Success body of `POST /files/upload`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_request_wraps_args() {
        let mut args = CommandArgs::new();
        args.insert("name".into(), json!("Ana"));
        let body = serde_json::to_value(RunRequest { args: &args }).expect("serialize RunRequest");
        assert_eq!(body, json!({ "args": { "name": "Ana" } }));
    }

    #[test]
    fn error_body_message_prefers_string_detail() {
        let body: ErrorBody = serde_json::from_value(json!({ "detail": "Plugin not found or disabled" })).unwrap();
        assert_eq!(body.message().as_deref(), Some("Plugin not found or disabled"));

        let empty: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert!(empty.message().is_none());

        let structured: ErrorBody = serde_json::from_value(json!({ "detail": [{ "loc": ["body"] }] })).unwrap();
        assert_eq!(structured.message().as_deref(), Some(r#"[{"loc":["body"]}]"#));
    }

    #[test]
    fn run_response_defaults_missing_output_to_null() {
        let body: RunResponse = serde_json::from_value(json!({ "ok": true })).unwrap();
        assert_eq!(body.output, Value::Null);
    }
}
