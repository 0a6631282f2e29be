//! Error types for `dokumd`.
//!
//! Each stage of a run (scanning, conversion, emission, media relocation,
//! configuration) has its own error enum. They are aggregated into
//! [`DokumdError`], which also maps every failure to a process exit code.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `dokumd` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error (including external engine failures)
    pub const ERROR: i32 = 1;

    /// Configuration error (unreadable settings file, invalid value)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (permission denied, disk full, unreadable page)
    pub const IO_ERROR: i32 = 3;

    /// A destination page already exists and `--force` was not given
    pub const ALREADY_EXISTS: i32 = 4;

    /// The page root or media root does not exist
    pub const MISSING_SOURCE_ROOT: i32 = 5;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Which source root a [`DokumdError::MissingSourceRoot`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRoot {
    /// The DokuWiki `data/pages` directory.
    Pages,
    /// The DokuWiki `data/media` directory.
    Media,
}

impl fmt::Display for SourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pages => f.write_str("page"),
            Self::Media => f.write_str("media"),
        }
    }
}

/// Top-level error type for `dokumd` operations.
#[derive(Debug, Error)]
pub enum DokumdError {
    /// A source root given on the command line does not exist
    #[error("{kind} root does not exist: {}", path.display())]
    MissingSourceRoot {
        /// Which root is missing
        kind: SourceRoot,
        /// The path that was given
        path: PathBuf,
    },

    /// A page file could not be read
    #[error("failed to read page {}: {source}", path.display())]
    ReadPage {
        /// The page file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Settings loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page enumeration error
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Conversion engine error
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Page emission error
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Media relocation error
    #[error(transparent)]
    Media(#[from] MediaError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DokumdError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingSourceRoot { .. } => ExitCode::MISSING_SOURCE_ROOT,
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Emit(EmitError::AlreadyExists { .. }) => ExitCode::ALREADY_EXISTS,
            Self::ReadPage { .. }
            | Self::Scan(_)
            | Self::Emit(_)
            | Self::Media(_)
            | Self::Io(_)
            | Self::Json(_) => ExitCode::IO_ERROR,
            Self::Engine(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Identifier Errors
// ============================================================================

/// A page identifier could not be built because it would break the
/// segment invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// No segments at all
    #[error("page identifier has no segments")]
    Empty,

    /// One of the segments is the empty string
    #[error("page identifier segment {index} is empty")]
    EmptySegment {
        /// Zero-based segment position
        index: usize,
    },

    /// A segment contains the `:` hierarchy delimiter
    #[error("page identifier segment '{segment}' contains the ':' delimiter")]
    DelimiterInSegment {
        /// The offending segment
        segment: String,
    },

    /// A path component is not valid UTF-8
    #[error("path component is not valid UTF-8: {0}")]
    NonUtf8(String),

    /// A path component is not a plain name (`..`, a root or a prefix)
    #[error("path component '{0}' cannot be part of a page identifier")]
    InvalidComponent(String),
}

// ============================================================================
// Scan Errors
// ============================================================================

/// Errors raised while enumerating source pages.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory traversal failed
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        /// Root being walked
        root: PathBuf,
        /// Underlying walkdir error
        #[source]
        source: walkdir::Error,
    },
}

// ============================================================================
// Engine Errors
// ============================================================================

/// Conversion engine errors.
///
/// The built-in engine never fails; these are raised by external engines
/// and are propagated unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The external engine command is empty or could not be split
    #[error("invalid engine command: {0}")]
    InvalidCommand(String),

    /// The external engine process could not be spawned or talked to
    #[error("engine process failed to start: {0}")]
    SpawnFailed(String),

    /// The external engine exited unsuccessfully
    #[error("engine exited with status {code:?} for page '{page}': {stderr}")]
    NonZeroExit {
        /// Page being converted
        page: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The external engine produced output that is not UTF-8
    #[error("engine produced invalid output for page '{page}': {message}")]
    InvalidOutput {
        /// Page being converted
        page: String,
        /// Decoder message
        message: String,
    },
}

// ============================================================================
// Emit Errors
// ============================================================================

/// Page emission errors.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Destination exists and overwriting is disabled
    #[error("destination already exists: {} (use --force to overwrite)", path.display())]
    AlreadyExists {
        /// Destination page path
        path: PathBuf,
    },

    /// Creating directories or writing the page failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination page path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Media Errors
// ============================================================================

/// Media relocation errors.
///
/// An already existing destination is never an error; the file is skipped.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Directory traversal failed
    #[error("failed to walk media root {}: {source}", root.display())]
    Walk {
        /// Media root being walked
        root: PathBuf,
        /// Underlying walkdir error
        #[source]
        source: walkdir::Error,
    },

    /// Copying a single asset failed
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source asset
        from: PathBuf,
        /// Destination asset
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Settings file loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file not found
    #[error("settings file not found: {}", path.display())]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Settings file could not be read
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing failed
    #[error("parse error in {}: {message}", path.display())]
    ParseError {
        /// Path to the settings file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `dokumd` operations.
pub type Result<T> = std::result::Result<T, DokumdError>;

// ============================================================================
// Tests
// ============================================================================
