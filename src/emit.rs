//! Writes converted pages into the output tree.
//!
//! Without overwrite enabled an existing destination is an error that stops
//! the run, so a previous import is never clobbered by accident.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::ConvertedDocument;
use crate::error::EmitError;

/// Writes pages below an output root.
#[derive(Debug, Clone)]
pub struct PageEmitter {
    output_root: PathBuf,
    overwrite: bool,
}

impl PageEmitter {
    /// Creates an emitter for `output_root`.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            output_root: output_root.into(),
            overwrite,
        }
    }

    /// Root of the output tree.
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Absolute destination of `doc`.
    #[must_use]
    pub fn destination(&self, doc: &ConvertedDocument) -> PathBuf {
        self.output_root.join(doc.path().to_path_buf())
    }

    /// Writes `doc` and returns the path written.
    ///
    /// Parent directories are created as needed; creating an existing
    /// directory is not an error. The existence check and the write are
    /// two separate steps.
    ///
    /// # Errors
    ///
    /// Returns `EmitError::AlreadyExists` if the destination exists and
    /// overwrite is disabled, or `EmitError::Write` on I/O failure.
    pub fn emit(&self, doc: &ConvertedDocument) -> Result<PathBuf, EmitError> {
        let path = self.destination(doc);

        if !self.overwrite && path.exists() {
            return Err(EmitError::AlreadyExists { path });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| EmitError::Write {
                path: path.clone(),
                source,
            })?;
        }

        fs::write(&path, doc.text()).map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = doc.text().len(), "page written");
        Ok(path)
    }
}
