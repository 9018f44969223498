use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::assembler::Puzzle;

/// Write bytes to `path` atomically: readers see either the old file or the
/// complete new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

/// Save puzzles as pretty JSON, creating the parent directory if needed.
///
/// Callers strip internal scores first; whatever is in the rounds is written.
pub fn write_puzzles(path: &Path, puzzles: &[Puzzle]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut json = serde_json::to_vec_pretty(puzzles).context("Failed to serialize puzzles")?;
    json.push(b'\n');
    write_atomic(path, &json)
}
