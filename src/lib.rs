//! Dirtree - a tree command that saves the directory structure to XML

pub mod error;
pub mod output;
pub mod roster;
pub mod store;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use output::{OutputConfig, TreeFormatter};
pub use roster::{Staff, Worker};
pub use store::{DataHandler, Format, JsonHandler, XmlElement, XmlHandler, decode, encode};
pub use tree::{EntryKind, TreeNode, TreeWalker, WalkerConfig, filter_entries};
