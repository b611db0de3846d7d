//! Error type for the interface layer.
//!
//! Wraps every failure mode of the surrounding surface (I/O,
//! deserialization, startup grammar defects, per-invocation usage errors)
//! and maps each to the conventional exit code: configuration failures
//! exit 2, usage errors exit 1.

use thiserror::Error;

use usage_pattern_core::TypeError;
use usage_pattern_engine::{GrammarError, UsageError};

/// Errors surfaced by the interface layer.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Interface definition file with an extension this loader does not
    /// read.
    #[error("unsupported interface definition format: {0}")]
    UnsupportedFormat(String),

    /// A pattern or command tree failed to compile at startup.
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The user's invocation did not fit the interface.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A configured parameter default fails its own declared type.
    #[error("invalid default for -{flag}: {source}")]
    InvalidDefault {
        flag: String,
        #[source]
        source: TypeError,
    },

    /// A file could not be opened.
    #[error("cannot open {path}: {reason}")]
    FileAccess { path: String, reason: String },
}

impl CliError {
    /// Conventional process exit code: usage errors are the user's
    /// problem (1), everything else is the author's or the machine's (2).
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            _ => 2,
        }
    }
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
