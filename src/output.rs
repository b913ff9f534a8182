use crate::error::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const DEFAULT_OUTPUT: &str = "qa_test_plan.md";

/// Replaces `path` with `content`. The text goes to an anonymous draft next to
/// the target and is renamed into place, so the output is either old or
/// complete. A failed write leaves no draft behind.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let wrap = |source: io::Error| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut draft = NamedTempFile::new_in(dir).map_err(wrap)?;
    draft.write_all(content.as_bytes()).map_err(wrap)?;
    if let Ok(meta) = fs::metadata(path) {
        draft
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(wrap)?;
    }
    draft.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
