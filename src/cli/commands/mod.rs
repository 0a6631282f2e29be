//! CLI command handlers
//!
//! Routes parsed CLI arguments to the conversion handler.

pub mod convert;

use crate::cli::args::Cli;
use crate::error::DokumdError;

/// Dispatch a parsed CLI invocation.
///
/// # Errors
///
/// Returns an error if the conversion fails.
pub fn dispatch(cli: &Cli) -> Result<(), DokumdError> {
    convert::run(cli).map(|_| ())
}
