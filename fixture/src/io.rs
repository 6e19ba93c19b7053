//! Reading and writing fixture files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{FixtureError, FixtureResult};
use crate::types::FixtureDocument;

impl FixtureDocument {
    /// Parses a fixture from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> FixtureResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serializes the fixture as JSON with 2-space indentation.
    pub fn to_json_pretty(&self) -> FixtureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes `doc` to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_document(path: &Path, doc: &FixtureDocument) -> FixtureResult<()> {
    debug!(path = %path.display(), entities = doc.len(), "writing fixture");
    let io_err = |source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Reads a fixture file back into memory.
pub fn read_document(path: &Path) -> FixtureResult<FixtureDocument> {
    let bytes = fs::read(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FixtureDocument::from_json_slice(&bytes)
}
