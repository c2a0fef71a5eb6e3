//! Saving readings to disk.
//!
//! A path ending in `.jsonl` gets one compact record appended per reading;
//! any other path is overwritten with a single pretty-printed document.
//! The reading is serialized before the file is touched, so a failed
//! serialization never leaves a partial write behind.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::SortResult;

/// How a reading is written to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Append one JSON record per line.
    JsonLines,
    /// Overwrite with one pretty-printed JSON document.
    Json,
}

impl SaveMode {
    /// Pick the mode from the file extension.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") => Self::JsonLines,
            _ => Self::Json,
        }
    }
}

/// Serialize `reading` in the given mode.
pub fn render<T: Serialize>(reading: &T, mode: SaveMode) -> SortResult<String> {
    Ok(match mode {
        SaveMode::JsonLines => {
            let mut line = serde_json::to_string(reading)?;
            line.push('\n');
            line
        }
        SaveMode::Json => serde_json::to_string_pretty(reading)?,
    })
}

/// Write `reading` to `path`, choosing the mode from its extension.
pub fn save<T: Serialize>(reading: &T, path: &Path) -> SortResult<SaveMode> {
    let mode = SaveMode::for_path(path);
    let content = render(reading, mode)?;

    match mode {
        SaveMode::JsonLines => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            file.write_all(content.as_bytes())?;
        }
        SaveMode::Json => std::fs::write(path, content)?,
    }

    tracing::info!(path = %path.display(), ?mode, "reading saved");
    Ok(mode)
}
