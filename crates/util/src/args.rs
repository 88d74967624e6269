//! Parsing of command arguments supplied on the command line.
//!
//! Values are kept as JSON strings; type coercion is up to the backend.

use serde_json::Value;
use thiserror::Error;
use werkstatt_types::CommandArgs;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgParseError {
    #[error("expected key=value, got '{0}'")]
    MissingSeparator(String),
    #[error("argument name must not be empty in '{0}'")]
    EmptyKey(String),
    #[error("--args-json must be a JSON object")]
    NotAnObject,
    #[error("invalid --args-json: {0}")]
    InvalidJson(String),
}

/// Split `key=value` at the first `=`. The value may be empty or contain `=`.
pub fn parse_key_value(pair: &str) -> Result<(String, String), ArgParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ArgParseError::MissingSeparator(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ArgParseError::EmptyKey(pair.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Merge an optional JSON object with `key=value` pairs. Pairs are applied
/// after the JSON object and win on conflicts.
pub fn build_args(json: Option<&str>, pairs: &[String]) -> Result<CommandArgs, ArgParseError> {
    let mut args = CommandArgs::new();
    if let Some(raw) = json {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => args.extend(map),
            Ok(_) => return Err(ArgParseError::NotAnObject),
            Err(error) => return Err(ArgParseError::InvalidJson(error.to_string())),
        }
    }
    for pair in pairs {
        let (key, value) = parse_key_value(pair)?;
        args.insert(key, Value::String(value));
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_key_value("msg=").unwrap(), ("msg".to_string(), String::new()));
        assert_eq!(
            parse_key_value("nothing"),
            Err(ArgParseError::MissingSeparator("nothing".into()))
        );
        assert_eq!(parse_key_value(" =x"), Err(ArgParseError::EmptyKey(" =x".into())));
    }

    #[test]
    fn build_args_merges_json_then_pairs() {
        let args = build_args(
            Some(r#"{"count": 3, "name": "Welt"}"#),
            &["name=Ana".to_string(), "msg=hi".to_string()],
        )
        .unwrap();
        assert_eq!(args.get("count"), Some(&json!(3)));
        assert_eq!(args.get("name"), Some(&json!("Ana")));
        assert_eq!(args.get("msg"), Some(&json!("hi")));
    }

    #[test]
    fn build_args_rejects_non_objects() {
        assert_eq!(build_args(Some("[1,2]"), &[]), Err(ArgParseError::NotAnObject));
        assert!(matches!(build_args(Some("{"), &[]), Err(ArgParseError::InvalidJson(_))));
        assert!(build_args(None, &[]).unwrap().is_empty());
    }
}
