//! Media relocation.
//!
//! Copies every regular file below the DokuWiki media root into
//! `<output>/_media/`, keeping relative paths. Unlike pages, a media file
//! that already exists at the destination is skipped without error when
//! overwrite is disabled.

use std::fs::{self, File, FileTimes};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::MediaError;

/// Folder below the output root that receives media files.
pub const MEDIA_DIR: &str = "_media";

/// Outcome of a relocation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaReport {
    /// Files copied.
    pub copied: usize,
    /// Files left alone because the destination already existed.
    pub skipped: usize,
}

/// Copies a media tree under the output root.
#[derive(Debug, Clone)]
pub struct MediaRelocator {
    source_root: PathBuf,
    dest_root: PathBuf,
    overwrite: bool,
}

impl MediaRelocator {
    /// Creates a relocator from `source_root` into `dest_root/_media`.
    #[must_use]
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        overwrite: bool,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            overwrite,
        }
    }

    /// Directory the media tree is copied into.
    #[must_use]
    pub fn media_root(&self) -> PathBuf {
        self.dest_root.join(MEDIA_DIR)
    }

    /// Copies every file and reports how many were copied or skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be walked or a file cannot be
    /// copied. Existing destinations are never an error.
    pub fn relocate(&self) -> Result<MediaReport, MediaError> {
        let media_root = self.media_root();
        let mut report = MediaReport::default();

        for entry in WalkDir::new(&self.source_root).sort_by_file_name() {
            let entry = entry.map_err(|source| MediaError::Walk {
                root: self.source_root.clone(),
                source,
            })?;
            if !(entry.file_type().is_file() || entry.path().is_file()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.source_root) else {
                continue;
            };

            let dest = media_root.join(relative);
            if !self.overwrite && dest.exists() {
                debug!(media = %relative.display(), "destination exists, skipping");
                report.skipped += 1;
                continue;
            }

            copy_preserving_times(entry.path(), &dest).map_err(|source| MediaError::Copy {
                from: entry.path().to_path_buf(),
                to: dest.clone(),
                source,
            })?;
            info!(media = %relative.display(), "media copied");
            report.copied += 1;
        }

        Ok(report)
    }
}

/// Copies contents and permissions, then carries over access and
/// modification times.
fn copy_preserving_times(from: &Path, to: &Path) -> std::io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;

    let meta = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    // A read-only source yields a read-only copy; fall back to a read
    // handle, which is enough for the owner on Unix.
    let file = match File::options().write(true).open(to) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => File::open(to)?,
        Err(e) => return Err(e),
    };
    file.set_times(times)
}
