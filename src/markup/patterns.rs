//! Compiled DokuWiki construct patterns.
//!
//! Compiled once on first use and shared read-only for the rest of the
//! process.

use regex::Regex;
use std::sync::LazyLock;

/// A line starting with two or more `=`. The heading rule decides whether
/// the line also ends with a matching run.
pub static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(={2,})(.*)$").expect("valid regex"));

/// `**bold**`
pub static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));

/// `//italic//`
pub static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//([^/]+)//").expect("valid regex"));

/// `<code>` or `<code lang>` block; one newline after the opening tag and
/// one before the closing tag belong to the tags.
pub static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<code(?: [^>]*)?>\n?(.*?)\n?</code>").expect("valid regex")
});

/// `<nowiki>` block.
pub static NOWIKI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<nowiki>(.*?)</nowiki>").expect("valid regex"));

/// `{{target}}` or `{{target|alt}}`
pub static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(?P<target>[^}|]+)(?:\|(?P<alt>[^}]+))?\}\}").expect("valid regex")
});

/// `[[target]]` or `[[target|label]]`
pub static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[(?P<target>[^\]|]+)(?:\|(?P<label>[^\]]+))?\]\]").expect("valid regex")
});

/// `^ a ^ b ^` header row on a line of its own.
pub static TABLE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\^(.*?)\^$").expect("valid regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for re in [
            &HEADING_RE,
            &BOLD_RE,
            &ITALIC_RE,
            &CODE_BLOCK_RE,
            &NOWIKI_RE,
            &IMAGE_RE,
            &LINK_RE,
            &TABLE_HEADER_RE,
        ] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[test]
    fn link_pattern_captures_label() {
        let caps = LINK_RE.captures("see [[a:b|Bee]] here").unwrap();
        assert_eq!(&caps["target"], "a:b");
        assert_eq!(&caps["label"], "Bee");
    }

    #[test]
    fn image_pattern_label_is_optional() {
        let caps = IMAGE_RE.captures("{{ns:img.png}}").unwrap();
        assert_eq!(&caps["target"], "ns:img.png");
        assert!(caps.name("alt").is_none());
    }

    #[test]
    fn heading_pattern_captures_leading_run() {
        let caps = HEADING_RE.captures("==== Title ====").unwrap();
        assert_eq!(&caps[1], "====");
        assert_eq!(&caps[2], " Title ====");
        assert!(HEADING_RE.captures("= single =").is_none());
    }
}
