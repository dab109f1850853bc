//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `ConvertError` to exit codes and user-facing messages.

use nest_core::{ConvertError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Two records resolve to the same leaf.
    #[error("Duplicate nodes found: {0}")]
    DuplicateNodes(String),

    /// Input is not a non-empty list of records.
    #[error("Invalid input data: {0}")]
    InvalidData(String),

    /// Records lack nesting-level attributes.
    #[error("Badly formed input data: {0}")]
    BadlyFormed(String),

    /// Input is not valid JSON.
    #[error("Invalid json in input data: {0}")]
    InvalidJson(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server error.
    #[error("Server error: {0}")]
    Server(String),

    /// Unexpected core error.
    #[error("{0}")]
    Core(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DuplicateNodes(_)
            | Self::InvalidData(_)
            | Self::BadlyFormed(_)
            | Self::InvalidJson(_) => 65, // EX_DATAERR
            Self::Arguments(_) => 2,
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
            Self::Server(_) => 69, // EX_UNAVAILABLE
            Self::Core(_) => 1,
        }
    }
}

impl From<ConvertError> for CliError {
    fn from(err: ConvertError) -> Self {
        let message = err.to_string();
        match err {
            ConvertError::DuplicateNodesFound(_) => Self::DuplicateNodes(message),
            ConvertError::InvalidDataStructure(_) => Self::InvalidData(message),
            ConvertError::DataAttributeMissing { .. } => Self::BadlyFormed(message),
            ConvertError::Json(_) => Self::InvalidJson(message),
            ConvertError::InvalidNestingLevels(_) | ConvertError::MissingNestingLevels => {
                Self::Arguments(message)
            }
            ConvertError::MissingNode(_)
            | ConvertError::MissingRecord
            | ConvertError::NoTreeCreated => Self::Core(message),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
