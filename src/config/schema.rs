//! Settings file schema.
//!
//! Every field is optional; an empty file is equivalent to no file.
//!
//! ```yaml
//! force: false
//! jobs: 4
//! media_dir: /srv/dokuwiki/data/media
//! engine:
//!   command: "pandoc -f dokuwiki -t gfm"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Run settings read from a YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Overwrite existing pages and media.
    pub force: bool,

    /// Worker threads for page conversion (1 = sequential).
    pub jobs: usize,

    /// DokuWiki `data/media` directory.
    pub media_dir: Option<PathBuf>,

    /// External converter replacing the built-in rules.
    pub engine: Option<EngineSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            force: false,
            jobs: 1,
            media_dir: None,
            engine: None,
        }
    }
}

/// External converter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Command line, split with shell quoting rules.
    pub command: String,
}
