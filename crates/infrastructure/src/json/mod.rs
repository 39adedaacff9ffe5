//! Flattened JSON property sources
//!
//! A JSON object flattens into dotted keys: `{"server":{"port":8080}}`
//! becomes `server.port=8080`. Arrays index as `key[0]`, `key[1]`;
//! scalars render unquoted; `null` contributes an empty value.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use lacuna_domain::{PropertyMap, PropertySource};

/// Errors loading a JSON property document.
#[derive(Debug, Error)]
pub enum JsonSourceError {
    /// The file could not be read.
    #[error("failed to read JSON file {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse JSON file {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document root is not a JSON object.
    #[error("JSON property document {path} must have an object root")]
    NotAnObject {
        /// The offending file.
        path: PathBuf,
    },
}

/// Loads a JSON document into a map source named after its path.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// does not have an object root.
pub fn load_json_file(path: impl AsRef<Path>) -> Result<PropertySource, JsonSourceError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| JsonSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&text).map_err(|source| JsonSourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !value.is_object() {
        return Err(JsonSourceError::NotAnObject {
            path: path.to_path_buf(),
        });
    }

    let entries = flatten_json(&value);
    debug!(path = %path.display(), entries = entries.len(), "loaded JSON property document");
    Ok(PropertySource::with_map(path.display().to_string(), entries))
}

/// Flattens a JSON value into dotted property keys.
#[must_use]
pub fn flatten_json(value: &Value) -> PropertyMap {
    let mut entries = PropertyMap::new();
    flatten_into("", value, &mut entries);
    entries
}

fn flatten_into(prefix: &str, value: &Value, out: &mut PropertyMap) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&child, nested, out);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}[{index}]"), nested, out);
            }
        }
        Value::Null => {
            out.insert(prefix.to_string(), String::new());
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn get<'a>(map: &'a PropertyMap, key: &str) -> Option<&'a str> {
        map.get(key).map(String::as_str)
    }

    #[test]
    fn test_flatten_nested_objects() {
        let entries = flatten_json(&json!({
            "server": { "port": 8080, "host": "localhost" },
            "name": "lacuna"
        }));

        assert_eq!(get(&entries, "server.port"), Some("8080"));
        assert_eq!(get(&entries, "server.host"), Some("localhost"));
        assert_eq!(get(&entries, "name"), Some("lacuna"));
    }

    #[test]
    fn test_flatten_arrays() {
        let entries = flatten_json(&json!({ "hosts": ["a", "b"] }));
        assert_eq!(get(&entries, "hosts[0]"), Some("a"));
        assert_eq!(get(&entries, "hosts[1]"), Some("b"));
    }

    #[test]
    fn test_flatten_scalars_render_unquoted() {
        let entries = flatten_json(&json!({ "enabled": true, "ratio": 0.5 }));
        assert_eq!(get(&entries, "enabled"), Some("true"));
        assert_eq!(get(&entries, "ratio"), Some("0.5"));
    }

    #[test]
    fn test_flatten_null_is_empty_value() {
        let entries = flatten_json(&json!({ "empty": null }));
        assert_eq!(get(&entries, "empty"), Some(""));
    }

    #[test]
    fn test_flatten_deep_mixture() {
        let entries = flatten_json(&json!({
            "db": { "replicas": [ { "host": "r1" }, { "host": "r2" } ] }
        }));
        assert_eq!(get(&entries, "db.replicas[0].host"), Some("r1"));
        assert_eq!(get(&entries, "db.replicas[1].host"), Some("r2"));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("app.json");
        std::fs::write(&path, r#"{"server":{"port":8080}}"#).expect("write file");

        let source = load_json_file(&path).expect("loads");
        assert_eq!(source.name(), path.display().to_string());
        assert_eq!(source.lookup("server.port"), Some("8080"));
    }

    #[test]
    fn test_load_json_rejects_non_object_root() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("list.json");
        std::fs::write(&path, "[1, 2, 3]").expect("write file");

        let err = load_json_file(&path).expect_err("non-object root");
        assert!(matches!(err, JsonSourceError::NotAnObject { .. }));
    }

    #[test]
    fn test_load_json_rejects_invalid_json() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").expect("write file");

        let err = load_json_file(&path).expect_err("invalid JSON");
        assert!(matches!(err, JsonSourceError::Parse { .. }));
    }
}
