//! The built-in DokuWiki → Markdown rewrite rules.
//!
//! Each rule is a pure whole-document substitution. They run in the order
//! of [`RULES`]; later rules see the output of earlier ones and nothing
//! stops a rule from rewriting text produced by another (a link inside a
//! table header is converted by both). Constructs a rule does not recognise
//! are left as literal text.

use regex::Captures;

use super::links::LinkReference;
use super::patterns::{
    BOLD_RE, CODE_BLOCK_RE, HEADING_RE, IMAGE_RE, ITALIC_RE, LINK_RE, NOWIKI_RE, TABLE_HEADER_RE,
};

/// A named rewrite stage.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short name used in trace output.
    pub name: &'static str,
    /// The substitution.
    pub apply: fn(&str) -> String,
}

/// All rules in application order.
pub const RULES: [Rule; 6] = [
    Rule {
        name: "heading",
        apply: headings,
    },
    Rule {
        name: "emphasis",
        apply: emphasis,
    },
    Rule {
        name: "code-block",
        apply: code_blocks,
    },
    Rule {
        name: "image",
        apply: images,
    },
    Rule {
        name: "link",
        apply: links,
    },
    Rule {
        name: "table-header",
        apply: table_headers,
    },
];

/// Runs every rule in order.
#[must_use]
pub fn apply_all(source: &str) -> String {
    RULES
        .iter()
        .fold(source.to_string(), |text, rule| (rule.apply)(&text))
}

/// `==== Title ====` → `#### Title`.
///
/// The number of `#` equals the number of `=`, which inverts DokuWiki's own
/// ranking (six `=` is its top level). Imported wikis rely on this mapping,
/// so it is kept.
///
/// The closing run must repeat the opening run. When the runs differ, the
/// longest opening run (at most six) that the line also ends with wins and
/// the leftover `=` stay in the title: `== Title ===` → `## Title =`.
/// Lines with no such run are left alone.
#[must_use]
pub fn headings(text: &str) -> String {
    HEADING_RE
        .replace_all(text, |caps: &Captures| {
            heading(&caps[0], caps[1].len()).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Converts one line whose leading `=` run is `run` bytes long.
fn heading(line: &str, run: usize) -> Option<String> {
    (2..=run.min(6)).rev().find_map(|level| {
        let (open, rest) = line.split_at(level);
        let title = rest.strip_suffix(open)?;
        Some(format!("{} {}", "#".repeat(level), title.trim()))
    })
}

/// `**bold**` stays bold, `//italic//` becomes `*italic*`.
#[must_use]
pub fn emphasis(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, "**$1**");
    ITALIC_RE.replace_all(&bold, "*$1*").into_owned()
}

/// `<code>` and `<nowiki>` blocks become fenced blocks.
#[must_use]
pub fn code_blocks(text: &str) -> String {
    let code = CODE_BLOCK_RE.replace_all(text, |caps: &Captures| fence(&caps[1]));
    NOWIKI_RE
        .replace_all(&code, |caps: &Captures| fence(&caps[1]))
        .into_owned()
}

/// `{{ns:img.png|alt}}` → `![alt](ns/img.png)`.
#[must_use]
pub fn images(text: &str) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures| {
            LinkReference::from_captures(caps, "alt")
                .map_or_else(|| caps[0].to_string(), |r| r.to_image())
        })
        .into_owned()
}

/// `[[ns:page|Label]]` → `[Label](ns/page.md)`.
#[must_use]
pub fn links(text: &str) -> String {
    LINK_RE
        .replace_all(text, |caps: &Captures| {
            LinkReference::from_captures(caps, "label")
                .map_or_else(|| caps[0].to_string(), |r| r.to_link())
        })
        .into_owned()
}

/// `^ a ^ b ^` → `| a | b |`.
///
/// Only header rows are rewritten; `|` body rows are already valid
/// Markdown table syntax.
#[must_use]
pub fn table_headers(text: &str) -> String {
    TABLE_HEADER_RE
        .replace_all(text, |caps: &Captures| {
            let cells: Vec<&str> = caps[1].split('^').map(str::trim).collect();
            format!("| {} |", cells.join(" | "))
        })
        .into_owned()
}

/// Wraps a verbatim body in a Markdown fence, dropping blank lines at the
/// start and trailing whitespace at the end.
fn fence(body: &str) -> String {
    let mut start = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }
    format!("```\n{}\n```", body[start..].trim_end())
}
