//! CLI argument definitions
//!
//! Clap derive structs for `dokumd` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Convert DokuWiki syntax and page tree to Markdown for Wiki.js import.
#[derive(Parser, Debug)]
#[command(name = "dokumd", author, version, about)]
pub struct Cli {
    /// Path to the DokuWiki data/pages directory.
    pub pages_dir: PathBuf,

    /// Destination root for Markdown files.
    pub output_dir: PathBuf,

    /// Path to the DokuWiki data/media directory.
    #[arg(long)]
    pub media_dir: Option<PathBuf>,

    /// Overwrite existing files in the output.
    #[arg(long)]
    pub force: bool,

    /// Show converted pages and media (-v), more detail with -vv / -vvv.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "DOKUMD_COLOR")]
    pub color: ColorChoice,

    /// Log line format.
    #[arg(long, default_value = "human")]
    pub log_format: LogFormat,

    /// YAML settings file.
    #[arg(short, long, env = "DOKUMD_CONFIG")]
    pub config: Option<PathBuf>,

    /// External converter command used instead of the built-in rules.
    #[arg(long, env = "DOKUMD_ENGINE_COMMAND")]
    pub engine_command: Option<String>,

    /// Worker threads for page conversion.
    #[arg(short, long, env = "DOKUMD_JOBS")]
    pub jobs: Option<usize>,

    /// Write a JSON run report to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

// ============================================================================
// Tests
// ============================================================================
