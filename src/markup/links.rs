//! Resolution of `[[links]]` and `{{images}}` into Markdown.
//!
//! Targets are never checked against the filesystem. A link to a page that
//! does not exist still produces a well-formed Markdown link.

use regex::Captures;

use super::path::{ASSET_EXTENSION, PAGE_EXTENSION, map_target};

/// What a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Another wiki page; gets the `.md` extension.
    Page,
    /// A media file; keeps its own extension.
    Asset,
}

impl LinkKind {
    const fn extension(self) -> &'static str {
        match self {
            Self::Page => PAGE_EXTENSION,
            Self::Asset => ASSET_EXTENSION,
        }
    }
}

/// Resolves a raw DokuWiki target into a relative Markdown path.
#[must_use]
pub fn resolve(target: &str, kind: LinkKind) -> String {
    map_target(target, kind.extension()).to_string()
}

/// Target and optional label of a link or image construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference<'a> {
    /// Raw target exactly as written.
    pub target: &'a str,
    /// Text after the `|`, if any.
    pub label: Option<&'a str>,
}

impl<'a> LinkReference<'a> {
    /// Extracts a reference from a match with `target` and `label_group`
    /// named groups.
    #[must_use]
    pub fn from_captures(caps: &Captures<'a>, label_group: &str) -> Option<Self> {
        let target = caps.name("target")?.as_str();
        let label = caps.name(label_group).map(|m| m.as_str());
        Some(Self { target, label })
    }

    /// `![alt](path)`; a missing alt text becomes an empty label.
    #[must_use]
    pub fn to_image(&self) -> String {
        let alt = self.label.unwrap_or_default();
        format!("![{alt}]({})", resolve(self.target, LinkKind::Asset))
    }

    /// `[label](path.md)`; a missing label falls back to the raw target.
    #[must_use]
    pub fn to_link(&self) -> String {
        let label = self.label.unwrap_or(self.target);
        format!("[{label}]({})", resolve(self.target, LinkKind::Page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_targets_get_md_extension() {
        assert_eq!(resolve("ns:sub:page", LinkKind::Page), "ns/sub/page.md");
    }

    #[test]
    fn asset_targets_keep_their_extension() {
        assert_eq!(resolve("ns:img.png", LinkKind::Asset), "ns/img.png");
    }

    #[test]
    fn link_with_label() {
        let reference = LinkReference {
            target: "ns:sub:page",
            label: Some("Label"),
        };
        assert_eq!(reference.to_link(), "[Label](ns/sub/page.md)");
    }

    #[test]
    fn link_label_defaults_to_target() {
        let reference = LinkReference {
            target: "start",
            label: None,
        };
        assert_eq!(reference.to_link(), "[start](start.md)");
    }

    #[test]
    fn image_without_alt_has_empty_label() {
        let reference = LinkReference {
            target: "ns:img.png",
            label: None,
        };
        assert_eq!(reference.to_image(), "![](ns/img.png)");
    }

    #[test]
    fn dangling_targets_are_not_errors() {
        let reference = LinkReference {
            target: "does:not:exist",
            label: Some("gone"),
        };
        assert_eq!(reference.to_link(), "[gone](does/not/exist.md)");
    }
}
