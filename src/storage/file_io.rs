//! JSON file I/O with atomic writes
//!
//! A write either replaces the whole file or leaves the old one in place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SpendscopeError, SpendscopeResult};

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> SpendscopeError {
    SpendscopeError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn parse<T: DeserializeOwned>(path: &Path) -> SpendscopeResult<T> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Read JSON from a file, or `None` if it doesn't exist
pub fn read_json_optional<T, P>(path: P) -> SpendscopeResult<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    parse(path).map(Some)
}

/// Read JSON from a file, returning an error if it doesn't exist
pub fn read_json_required<T, P>(path: P) -> SpendscopeResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(SpendscopeError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse(path)
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> SpendscopeResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}
