//! Configuration types for the tree walker

use crate::error::{Error, Result};

/// Which kinds of entries are listed as children of a directory.
///
/// A single value rather than two flags, so directory-only and file-only
/// listing can never be requested together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKind {
    #[default]
    All,
    DirsOnly,
    FilesOnly,
}

impl EntryKind {
    /// Build from the pair of command-line style flags.
    pub fn from_flags(dirs_only: bool, files_only: bool) -> Result<Self> {
        match (dirs_only, files_only) {
            (true, true) => Err(Error::ConflictingFilters),
            (true, false) => Ok(EntryKind::DirsOnly),
            (false, true) => Ok(EntryKind::FilesOnly),
            (false, false) => Ok(EntryKind::All),
        }
    }
}

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Include entries whose name starts with `.`
    pub show_all: bool,
    pub kind: EntryKind,
    /// Directories at this depth are listed but not descended into.
    /// The root is depth 0.
    pub max_depth: Option<usize>,
}

impl WalkerConfig {
    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth >= max)
    }
}
