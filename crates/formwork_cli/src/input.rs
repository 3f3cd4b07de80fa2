//! Reading JSON/YAML input files and `key=value` arguments.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse `path` as YAML when its extension says so, JSON otherwise.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("File not found or unreadable: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

/// Split `key=value`. The value is read as JSON when it parses, so
/// `size=5` is a number and `type=person` a string.
pub fn parse_pair(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Invalid key=value pair: {raw}"))?;
    if key.is_empty() {
        anyhow::bail!("Invalid key=value pair: {raw}");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("errors.yaml");
        std::fs::write(&yaml_path, "metadata:\n  title: Required\n").unwrap();
        let value: Value = load_document(&yaml_path).unwrap();
        assert_eq!(value, json!({"metadata": {"title": "Required"}}));

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile_in(dir.path()).unwrap();
        write!(json_file, r#"{{"files": ["Too large"]}}"#).unwrap();
        let value: Value = load_document(json_file.path()).unwrap();
        assert_eq!(value["files"][0], "Too large");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document::<Value>(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("size=5").unwrap(), ("size".to_string(), json!(5)));
        assert_eq!(
            parse_pair("type=person").unwrap(),
            ("type".to_string(), json!("person"))
        );
        assert_eq!(
            parse_pair(r#"type=["a","b"]"#).unwrap().1,
            json!(["a", "b"])
        );
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }
}
