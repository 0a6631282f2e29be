//! Command-line interface
//!
//! Argument definitions and the handler that turns them into a run.

pub mod args;
pub mod commands;
