//! Tree formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Formatter for complete tree structures, plain or colored

mod config;
mod tree;

// Re-export public types
pub use config::OutputConfig;
pub use tree::TreeFormatter;
