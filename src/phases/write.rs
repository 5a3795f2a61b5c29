//! Phase 2: Writing the ignore file.
//!
//! Renders the collected records into the final ignore-file text (one
//! pattern per line, newline-terminated) and writes it atomically: the
//! content goes to a sibling temporary file first and is renamed over the
//! target, so a failure mid-write never leaves a truncated file at the
//! requested path. A pre-existing file is replaced, never merged.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::patterns::PropertyRecord;

/// Render records into the final ignore-file text.
pub fn render(records: &[PropertyRecord]) -> String {
    let mut text = String::new();
    for record in records {
        for entry in record.entries() {
            text.push_str(&entry);
            text.push('\n');
        }
    }
    text
}

/// Execute Phase 2: write the rendered records to `output` atomically.
pub fn execute(records: &[PropertyRecord], output: &Path) -> Result<()> {
    let content = render(records);
    let tmp = temporary_path(output);

    fs::write(&tmp, &content).map_err(|e| Error::Write {
        path: output.display().to_string(),
        message: format!("failed to write temporary file '{}': {}", tmp.display(), e),
    })?;

    if let Err(e) = fs::rename(&tmp, output) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::Write {
            path: output.display().to_string(),
            message: format!("failed to move temporary file into place: {}", e),
        });
    }

    debug!("wrote {} bytes to {}", content.len(), output.display());
    Ok(())
}

fn temporary_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "ignore".into());
    name.push(".tmp");
    output.with_file_name(name)
}
