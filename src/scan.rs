//! Source page enumeration.
//!
//! Walks the DokuWiki `pages` directory and derives every page's identifier
//! from its location: `wiki/syntax.txt` is the page `wiki:syntax`.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::document::PageIdentifier;
use crate::error::{IdentifierError, ScanError};

/// Extension of DokuWiki page files.
pub const SOURCE_EXTENSION: &str = "txt";

/// A page file and the identifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// Path of the `.txt` file.
    pub source: PathBuf,
    /// Identifier derived from the path relative to the page root.
    pub id: PageIdentifier,
}

/// A page file whose path does not form a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    /// Path of the `.txt` file.
    pub source: PathBuf,
    /// Why no identifier could be formed.
    pub reason: IdentifierError,
}

/// Result of walking the page root.
#[derive(Debug, Default)]
pub struct PageScan {
    /// Pages in file-name order.
    pub pages: Vec<PageEntry>,
    /// Files that could not be mapped to an identifier.
    pub skipped: Vec<SkippedPage>,
}

/// Enumerates page files below `root` with the given extension.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be walked.
pub fn scan_pages(root: &Path, extension: &str) -> Result<PageScan, ScanError> {
    let mut scan = PageScan::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !(entry.file_type().is_file() || path.is_file()) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        match PageIdentifier::from_relative_path(relative) {
            Ok(id) => scan.pages.push(PageEntry {
                source: path.to_path_buf(),
                id,
            }),
            Err(reason) => {
                warn!(path = %path.display(), %reason, "skipping page without a valid identifier");
                scan.skipped.push(SkippedPage {
                    source: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    Ok(scan)
}
