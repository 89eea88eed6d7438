//! Document loading and persistence.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The HTML document a pipeline run operates on.
///
/// Read once at start; the rewritten text is written once at the end
/// (twice with a backup).
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    /// Read the document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read input document `{}`", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Directory containing the document.
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Write an unmodified copy of the original next to the document.
    /// Returns the backup path.
    pub fn write_backup(&self, file_name: &str) -> Result<PathBuf> {
        let backup = self.dir().join(file_name);
        fs::write(&backup, &self.text)
            .with_context(|| format!("cannot write backup `{}`", backup.display()))?;
        Ok(backup)
    }
}

/// Persist document text to `target`.
///
/// The content is serialized to a temporary file in the target directory
/// and renamed over the target, so a failed write leaves any existing
/// file untouched.
pub fn persist(text: &str, target: &Path) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid output path `{}`", target.display()))?;

    let tmp = dir.join(format!(".{file_name}.tmp"));
    if let Err(e) = fs::write(&tmp, text) {
        fs::remove_file(&tmp).ok();
        return Err(e).with_context(|| format!("cannot write `{}`", target.display()));
    }
    fs::rename(&tmp, target)
        .with_context(|| format!("cannot replace `{}`", target.display()))
}
