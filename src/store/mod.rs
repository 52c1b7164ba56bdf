//! Saving and loading directory trees
//!
//! `DataHandler` is the seam between the tree model and its on-disk formats.
//! - `xml` - XML documents (the default)
//! - `json` - pretty-printed JSON

mod json;
mod xml;

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::Result;
use crate::tree::TreeNode;

pub use json::JsonHandler;
pub use xml::{XmlElement, XmlHandler, decode, encode};

/// File stem of the tree file written by the command line tool.
pub const DEFAULT_FILE_STEM: &str = "directory_structure";

/// Persists a `TreeNode` to a file and reads it back.
pub trait DataHandler {
    /// Write `node` to `path`, replacing any existing file.
    fn save(&self, node: &TreeNode, path: &Path) -> Result<()>;

    fn load(&self, path: &Path) -> Result<TreeNode>;

    /// File extension for this format, without the dot.
    fn extension(&self) -> &'static str;

    /// Default output file name in `dir`.
    fn default_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", DEFAULT_FILE_STEM, self.extension()))
    }
}

/// On-disk format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    pub fn handler(self) -> Box<dyn DataHandler> {
        match self {
            Format::Xml => Box::new(XmlHandler),
            Format::Json => Box::new(JsonHandler),
        }
    }
}
