//! JSON dataset files on disk

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::types::SourceDump;

/// Load the scraped per-page dumps
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<SourceDump>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))
}

/// Write JSON with 4-space indentation, non-ASCII kept as-is, trailing newline
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    buf.push(b'\n');
    fs::write(path, buf).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
