//! Page identifier to filesystem path mapping.
//!
//! A DokuWiki identifier such as `wiki:syntax:tables` becomes the relative
//! path `wiki/syntax/tables.md`. Segments are used verbatim: no case folding
//! and no escaping of characters that the destination filesystem may reject.

use std::fmt;
use std::path::PathBuf;

use crate::document::PageIdentifier;

/// Hierarchy delimiter of DokuWiki page and media identifiers.
pub const DELIMITER: char = ':';

/// Extension appended to converted page paths.
pub const PAGE_EXTENSION: &str = ".md";

/// Extension appended to asset paths (none; the media id keeps its own).
pub const ASSET_EXTENSION: &str = "";

/// An ordered list of path segments plus a file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath {
    segments: Vec<String>,
    extension: String,
}

impl RelativePath {
    /// Path segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Extension appended to the last segment (may be empty).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Builds a platform path, appending the extension to the last segment.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        let mut path = PathBuf::new();
        let last = self.segments.len().saturating_sub(1);
        for (index, segment) in self.segments.iter().enumerate() {
            if index == last {
                path.push(format!("{segment}{}", self.extension));
            } else {
                path.push(segment);
            }
        }
        path
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.segments.join("/"), self.extension)
    }
}

/// Maps a validated page identifier to its relative output path.
#[must_use]
pub fn map_identifier(id: &PageIdentifier, extension: &str) -> RelativePath {
    RelativePath {
        segments: id.segments().to_vec(),
        extension: extension.to_string(),
    }
}

/// Maps a raw identifier string taken from page text.
///
/// Unlike [`map_identifier`] this accepts anything, including empty
/// segments (`:wiki:start` maps to `/wiki/start`), so that link targets
/// written by hand are carried over exactly as the author wrote them.
#[must_use]
pub fn map_target(raw: &str, extension: &str) -> RelativePath {
    RelativePath {
        segments: raw.split(DELIMITER).map(str::to_string).collect(),
        extension: extension.to_string(),
    }
}
