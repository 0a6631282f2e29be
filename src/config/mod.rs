//! Configuration module
//!
//! Optional YAML settings file. Command-line flags take precedence over
//! values read from the file.

pub mod loader;
pub mod schema;

pub use loader::{load_settings, parse_settings, validate};
pub use schema::{EngineSettings, Settings};
