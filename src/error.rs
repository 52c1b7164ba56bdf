//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while walking, saving or loading a directory tree.
#[derive(Error, Debug)]
pub enum Error {
    /// The walk root exists, but is not a directory.
    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// A directory could not be listed, for example due to missing permissions
    /// or an entry removed while walking.
    #[error("unable to read directory: {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tree file could not be created, written or read.
    #[error("unable to access file: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory-only and file-only listing were both requested.
    #[error("directory-only and file-only listing are mutually exclusive")]
    ConflictingFilters,

    /// Serializing a document into its output buffer failed.
    #[error("unable to write document")]
    Write(#[from] std::io::Error),

    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    /// The document has no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// A closing tag did not match the element it closes, or text was found
    /// outside the root element.
    #[error("unbalanced XML document: {0}")]
    Unbalanced(String),

    /// An element other than `directory` or `file`.
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),

    /// A `file` element with nested elements.
    #[error("file element '{0}' has children")]
    FileWithChildren(String),
}
