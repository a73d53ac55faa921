//! JSON and TOML data files loaded as values

use std::io::ErrorKind;
use std::path::Path;

use darkmagic_domain::error::{Error, Result};
use darkmagic_domain::value_objects::{Artifact, Value};

/// Whether `path` is a regular file; missing files are not an error
pub(crate) async fn is_data_file(name: &str, path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::loader(name, e)),
    }
}

/// Read and parse a data file
///
/// `Ok(None)` when the file disappeared since it was located.
pub(crate) async fn read_data_file(name: &str, path: &Path) -> Result<Option<Artifact>> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::loader(name, e)),
    };

    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str::<serde_json::Value>(&text).map_err(|e| Error::loader(name, e))?,
        _ => serde_json::from_str::<serde_json::Value>(&text).map_err(|e| Error::loader(name, e))?,
    };
    Ok(Some(Artifact::Value(Value::from(parsed))))
}
