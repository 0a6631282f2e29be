//! Conversion engines.
//!
//! An [`Engine`] turns the DokuWiki text of one page into Markdown. The
//! built-in engine runs the rewrite rules from [`crate::markup::rules`];
//! [`CommandEngine`] hands each page to an external converter instead.
//! Whichever engine is configured converts every page of a run.

pub mod command;

use tracing::trace;

use crate::document::PageIdentifier;
use crate::error::EngineError;
use crate::markup::RULES;

pub use command::CommandEngine;

/// Converts the text of a single page.
pub trait Engine: Send + Sync {
    /// Engine name for log output.
    fn name(&self) -> &str;

    /// Converts DokuWiki `source` of the page `page` into Markdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot produce output for this page.
    fn convert(&self, source: &str, page: &PageIdentifier) -> Result<String, EngineError>;
}

/// Regex rule engine; total over UTF-8 input.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEngine;

impl Engine for BuiltinEngine {
    fn name(&self) -> &str {
        "builtin"
    }

    fn convert(&self, source: &str, page: &PageIdentifier) -> Result<String, EngineError> {
        let mut text = source.to_string();
        for rule in &RULES {
            text = (rule.apply)(&text);
            trace!(page = %page, rule = rule.name, "rule applied");
        }
        Ok(text)
    }
}
