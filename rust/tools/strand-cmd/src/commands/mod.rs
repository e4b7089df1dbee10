//! Command implementations for strand-cmd

use anyhow::{Context, Result};
use std::path::Path;

use strand::{Collection, Selector, Value};

pub mod average;
pub mod chunk;
pub mod convert;
pub mod first;
pub mod group;
pub mod show;

/// Loads a JSON file holding a top-level array into a collection of values.
pub fn load_items(path: &str) -> Result<Collection<Value>> {
    let file_path = Path::new(path);
    if !file_path.is_file() {
        anyhow::bail!("File does not exist or is not a file: {}", path);
    }
    let text = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read input file: {}", path))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from: {}", path))?;
    let serde_json::Value::Array(items) = json else {
        anyhow::bail!("Expected a JSON array at the top level of {}", path);
    };
    log::debug!("loaded {} elements from {}", items.len(), path);
    Ok(items.iter().map(Value::from_json).collect())
}

/// Selector for an optional `--by` field.
pub fn selector_for(by: Option<String>) -> Selector<'static, Value> {
    by.map_or(Selector::Identity, Selector::Field)
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::io::Write;

    use tempfile::NamedTempFile;

    pub fn json_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn path_of(file: &NamedTempFile) -> String {
        file.path().to_str().unwrap().to_string()
    }

    pub fn utf8(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::*;
    use super::*;

    #[test]
    fn test_load_items() {
        let file = json_file(r#"[1, "two", {"three": 3}]"#);
        let items = load_items(&path_of(&file)).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items.at(1).unwrap(), &Value::from("two"));
        assert_eq!(items.at(2).unwrap().get("three"), Some(Value::Int(3)));
    }

    #[test]
    fn test_load_items_rejects_non_array() {
        let file = json_file(r#"{"a": 1}"#);
        let err = load_items(&path_of(&file)).unwrap_err();
        assert!(err.to_string().contains("JSON array"));

        let file = json_file("not json");
        assert!(load_items(&path_of(&file)).is_err());

        assert!(load_items("/definitely/not/here.json").is_err());
    }
}
