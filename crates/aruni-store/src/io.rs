//! JSON worksheet I/O and atomic file operations

use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Read a JSON document, returning `None` when the file does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> std::io::Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read(path)?;
    let value = serde_json::from_slice(&contents)?;
    Ok(Some(value))
}

/// Serialize a value as pretty JSON and write it atomically
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    atomic_write(path, &json)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
