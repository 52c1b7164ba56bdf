//! JSON tree files

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::tree::TreeNode;

use super::DataHandler;

/// Stores trees as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHandler;

impl DataHandler for JsonHandler {
    fn save(&self, node: &TreeNode, path: &Path) -> Result<()> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        serde_json::to_writer_pretty(&mut writer, node).map_err(|e| write_error(path, e))?;
        writeln!(writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        info!("saved tree to {}", path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TreeNode> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Serializer failures that came from the writer keep the file path.
fn write_error(path: &Path, error: serde_json::Error) -> Error {
    if error.is_io() {
        Error::Io {
            path: path.to_path_buf(),
            source: error.into(),
        }
    } else {
        Error::Json(error)
    }
}
