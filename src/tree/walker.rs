//! TreeWalker - builds the full tree in memory

use std::path::Path;

use log::{debug, trace};

use crate::error::{Error, Result};

use super::config::WalkerConfig;
use super::filter::filter_entries;
use super::node::TreeNode;

/// Recursive, depth-first tree walker.
///
/// The filters in `WalkerConfig` are applied at every level, so with
/// `EntryKind::DirsOnly` each directory still appears but lists only its
/// subdirectories.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root`, which must be a directory.
    ///
    /// The first filesystem error aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<TreeNode> {
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        self.walk_dir(root, 0)
    }

    fn walk_dir(&self, path: &Path, depth: usize) -> Result<TreeNode> {
        let name = node_name(path);

        // If at max depth, return the directory but don't descend
        if self.config.at_max_depth(depth) {
            trace!("max depth reached at {}", path.display());
            return Ok(TreeNode::dir(name, path, Vec::new()));
        }

        debug!("reading {}", path.display());
        let entries = filter_entries(path, &self.config)?;

        let mut children = Vec::with_capacity(entries.len());
        for entry_path in entries {
            if entry_path.is_dir() {
                children.push(self.walk_dir(&entry_path, depth + 1)?);
            } else {
                trace!("file {}", entry_path.display());
                children.push(TreeNode::file(node_name(&entry_path), entry_path));
            }
        }

        Ok(TreeNode::dir(name, path, children))
    }
}

/// Get the name of a path, falling back to the whole path for roots like `/`.
fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
