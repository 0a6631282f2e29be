//! `dokumd` - DokuWiki to Markdown converter
//!
//! Converts a DokuWiki `data/pages` tree into Markdown files laid out for
//! Wiki.js import, rewriting headings, emphasis, code blocks, images, links
//! and table headers, and relocates the `data/media` tree under `_media`.

pub mod cli;
pub mod config;
pub mod document;
pub mod emit;
pub mod engine;
pub mod error;
pub mod markup;
pub mod media;
pub mod observability;
pub mod pipeline;
pub mod scan;
pub mod site;
