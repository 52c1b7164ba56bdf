//! Per-directory entry filtering

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::config::{EntryKind, WalkerConfig};

/// Check whether a path's base name marks it as hidden.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// List the immediate children of `directory` that pass the filters in `config`.
///
/// Entries are sorted by file name. Type checks follow symlinks.
pub fn filter_entries(directory: &Path, config: &WalkerConfig) -> Result<Vec<PathBuf>> {
    let read_dir_error = |source| Error::ReadDir {
        path: directory.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_dir_error)? {
        entries.push(entry.map_err(read_dir_error)?);
    }
    entries.sort_by_key(|entry| entry.file_name());

    Ok(entries
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| config.show_all || !is_hidden(path))
        .filter(|path| match config.kind {
            EntryKind::All => true,
            EntryKind::DirsOnly => path.is_dir(),
            EntryKind::FilesOnly => path.is_file(),
        })
        .collect())
}
