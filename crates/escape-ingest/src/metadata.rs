//! Metadata YAML loading.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use escape_model::{EscapeError, Result};

/// Reads a study metadata file into an untyped YAML value.
///
/// Mapping keys keep their file order. The value still has to pass schema
/// validation before anything downstream may use it.
pub fn load_metadata_yaml(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| EscapeError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read metadata file");
    parse_metadata_yaml(&text, path)
}

/// Parses YAML text; `path` is used for error reporting only.
pub fn parse_metadata_yaml(text: &str, path: &Path) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|e| EscapeError::YamlParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_model::ErrorKind;

    #[test]
    fn test_parse_preserves_key_order() {
        let value = parse_metadata_yaml(
            "conditions:\n  Z9: {}\n  A1: {}\n  M5: {}\n",
            Path::new("study.yml"),
        )
        .unwrap();
        let conditions = value.get("conditions").and_then(Value::as_mapping).unwrap();
        let keys: Vec<&str> = conditions.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["Z9", "A1", "M5"]);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_metadata_yaml("key: [unclosed", Path::new("study.yml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_metadata_yaml(Path::new("/nonexistent/study.yml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
