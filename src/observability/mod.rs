//! Observability module
//!
//! Logging infrastructure for following a conversion run.

pub mod logging;

pub use logging::{LogFormat, init_logging};
