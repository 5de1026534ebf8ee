//! YAML and JSON document helpers.

use commonlog_types::{LogError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load a YAML (or JSON) file as a JSON value.
pub fn load_yaml_file(path: impl AsRef<Path>) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Recursively merge `overlay` into `base`; overlay values win.
///
/// Objects merge key by key. Any other overlay value replaces the base.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

/// Get the value at a dotted path. Numeric segments index into arrays.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Set the value at a dotted path, creating objects along the way.
///
/// Non-object values in the way are replaced by objects.
pub fn set_path(data: &mut Value, path: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(LogError::Config(format!("Invalid key: '{}'", path)));
    }

    let mut current = data;
    for part in parts {
        if !current.is_object() {
            *current = Value::Object(Default::default());
        }
        current = match current {
            Value::Object(map) => map.entry(part).or_insert(Value::Null),
            _ => commonlog_types::bug!("value at '{}' is not an object", part),
        };
    }

    *current = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge() {
        let base = json!({"log": {"verbosity": 0, "trace": false}, "name": "a"});
        let overlay = json!({"log": {"verbosity": 2}, "extra": [1]});

        assert_eq!(
            deep_merge(base, overlay),
            json!({"log": {"verbosity": 2, "trace": false}, "name": "a", "extra": [1]})
        );
        assert_eq!(deep_merge(json!({"a": 1}), json!(5)), json!(5));
    }

    #[test]
    fn test_get_path() {
        let data = json!({"log": {"levels": {"db": "error"}}, "list": [10, 20]});
        assert_eq!(get_path(&data, "log.levels.db"), Some(&json!("error")));
        assert_eq!(get_path(&data, "list.1"), Some(&json!(20)));
        assert_eq!(get_path(&data, "log.missing"), None);
        assert_eq!(get_path(&data, "list.x"), None);
    }

    #[test]
    fn test_set_path() {
        let mut data = json!({"log": 3});
        set_path(&mut data, "log.verbosity", json!(1)).unwrap();
        set_path(&mut data, "top", json!(true)).unwrap();

        assert_eq!(data, json!({"log": {"verbosity": 1}, "top": true}));
        assert!(set_path(&mut data, "log..x", json!(1)).is_err());
        assert!(set_path(&mut data, "", json!(1)).is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.yml");
        fs::write(&path, "log:\n  verbosity: 2\n").unwrap();

        assert_eq!(load_yaml_file(&path).unwrap(), json!({"log": {"verbosity": 2}}));
        assert!(load_yaml_file(dir.path().join("missing.yml")).is_err());
    }
}
