use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

/// Read and deserialize one JSON file.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    from_str_with_path(&source).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn error_mentions_json_path() {
        let src = r#"{ "definitions": [ { "name": "Page", "generics": "T" } ] }"#;
        let err = from_str_with_path::<Document>(src).unwrap_err().to_string();
        assert!(err.contains("definitions[0].generics"), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_json_file::<Document>(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
