//! Directory tree walking logic
//!
//! `TreeWalker` builds the full tree in memory. Printing and persistence
//! happen afterwards, over the finished `TreeNode`.

mod config;
mod filter;
mod node;
mod walker;

// Re-export public types
pub use config::{EntryKind, WalkerConfig};
pub use filter::{filter_entries, is_hidden};
pub use node::TreeNode;
pub use walker::TreeWalker;
