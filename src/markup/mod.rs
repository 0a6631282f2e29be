//! DokuWiki → Markdown translation.
//!
//! - [`path`]: identifier to relative path mapping
//! - [`links`]: `[[link]]` and `{{image}}` target resolution
//! - [`rules`]: the ordered rewrite rules of the built-in engine
//! - [`patterns`]: compiled construct patterns

pub mod links;
pub mod path;
pub mod patterns;
pub mod rules;

pub use links::{LinkKind, LinkReference, resolve};
pub use path::{
    ASSET_EXTENSION, DELIMITER, PAGE_EXTENSION, RelativePath, map_identifier, map_target,
};
pub use rules::{RULES, Rule, apply_all};
