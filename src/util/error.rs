// rtail - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation.
// Every fatal error is reported once at the process boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all rtail operations.
/// Errors are categorised by the phase of the session that produced them.
#[derive(Debug)]
pub enum TailError {
    /// The request could not be built from the command line.
    Config(ConfigError),

    /// The target could not be opened for reading.
    Open { path: PathBuf, source: io::Error },

    /// The periodic size/timestamp query failed while following.
    Poll { path: PathBuf, source: io::Error },

    /// I/O error with path context (reads, seeks, output writes).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl TailError {
    /// Process exit code for this error. Every fatal error maps to failure.
    pub fn exit_code(&self) -> i32 {
        super::constants::EXIT_FAILURE
    }
}

impl fmt::Display for TailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Open { path, source } => {
                write!(f, "Cannot open '{}': {source}", path.display())
            }
            Self::Poll { path, source } => write!(
                f,
                "Stopped following '{}': cannot stat: {source}",
                path.display()
            ),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Open { source, .. } => Some(source),
            Self::Poll { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors raised while validating command-line options, before any I/O.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a positional path nor `--path` was given.
    MissingPath,

    /// The path argument was an empty string.
    EmptyPath,

    /// The path exceeds the accepted length.
    PathTooLong { length: usize, max: usize },

    /// A numeric option is outside its allowed range.
    ValueOutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPath => write!(f, "no target path given"),
            Self::EmptyPath => write!(f, "target path is empty"),
            Self::PathTooLong { length, max } => write!(
                f,
                "provided path is too long ({length} bytes, maximum is {max})"
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(f, "'{field}' = '{value}' is out of range. Expected: {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for TailError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for rtail results.
pub type Result<T> = std::result::Result<T, TailError>;
