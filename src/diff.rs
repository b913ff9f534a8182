use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_INPUT: &str = "diff.txt";

/// Reads the whole diff as-is. The content is never parsed or validated.
pub fn read_diff(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadDiff {
        path: path.to_path_buf(),
        source,
    })
}
