//! Page identifiers and the documents that flow through a conversion.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use crate::error::IdentifierError;
use crate::markup::path::{DELIMITER, PAGE_EXTENSION, RelativePath, map_identifier};

/// Hierarchical DokuWiki page name, e.g. `wiki:syntax`.
///
/// Segments are never empty and never contain the `:` delimiter, so the
/// canonical string form and the segment list convert into each other
/// without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageIdentifier {
    segments: Vec<String>,
}

impl PageIdentifier {
    /// Builds an identifier from its segments.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no segments, a segment is empty, or a
    /// segment contains the delimiter.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(IdentifierError::Empty);
        }
        for (index, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(IdentifierError::EmptySegment { index });
            }
            if segment.contains(DELIMITER) {
                return Err(IdentifierError::DelimiterInSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(Self { segments })
    }

    /// Derives the identifier of a page file from its path relative to the
    /// page root. The file extension is dropped, so `wiki/syntax.txt`
    /// becomes `wiki:syntax`.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is not UTF-8 or the resulting
    /// segments break the identifier invariants.
    pub fn from_relative_path(relative: &Path) -> Result<Self, IdentifierError> {
        let stem = relative.with_extension("");
        let mut segments = Vec::new();
        for component in stem.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| IdentifierError::NonUtf8(part.to_string_lossy().into()))?;
                    segments.push(part.to_string());
                }
                Component::CurDir => {}
                other => {
                    return Err(IdentifierError::InvalidComponent(
                        other.as_os_str().to_string_lossy().into_owned(),
                    ));
                }
            }
        }
        Self::from_segments(segments)
    }

    /// Segments in hierarchy order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for PageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(&DELIMITER.to_string()))
    }
}

impl FromStr for PageIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segments(s.split(DELIMITER))
    }
}

/// Raw DokuWiki text of one page.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    id: PageIdentifier,
    text: String,
}

impl SourceDocument {
    /// Wraps page text read from disk.
    #[must_use]
    pub const fn new(id: PageIdentifier, text: String) -> Self {
        Self { id, text }
    }

    /// Identifier of the page.
    #[must_use]
    pub const fn id(&self) -> &PageIdentifier {
        &self.id
    }

    /// Unconverted page text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Markdown text of one page plus where it is written.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    id: PageIdentifier,
    text: String,
    path: RelativePath,
}

impl ConvertedDocument {
    /// Pairs converted text with the output path of its page.
    #[must_use]
    pub fn new(id: PageIdentifier, text: String) -> Self {
        let path = map_identifier(&id, PAGE_EXTENSION);
        Self { id, text, path }
    }

    /// Identifier of the page.
    #[must_use]
    pub const fn id(&self) -> &PageIdentifier {
        &self.id
    }

    /// Converted Markdown text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Output path relative to the output root.
    #[must_use]
    pub const fn path(&self) -> &RelativePath {
        &self.path
    }
}
