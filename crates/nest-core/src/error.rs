//! Converter error types.
//!
//! Every failure of the records-to-tree conversion is a `ConvertError`.
//! Adapters map these into their own error types (HTTP status codes,
//! CLI exit codes) using [`ConvertError::category`].

use thiserror::Error;

use crate::tree::NodeId;

/// Errors that can occur while building or exporting a tree.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// One or more records lack a nesting-level attribute.
    #[error("Key elements were missing in {count} records")]
    DataAttributeMissing { count: usize },

    /// Input is not a non-empty list of objects, or a grouping value is not a scalar.
    #[error("{0}")]
    InvalidDataStructure(String),

    /// Nesting levels are malformed (e.g. the same level named twice).
    #[error("Invalid nesting levels: {0}")]
    InvalidNestingLevels(String),

    /// Two records resolve to the same leaf.
    #[error("{0}")]
    DuplicateNodesFound(String),

    /// A branch was started from a node that is not part of the tree.
    #[error("Node {0} does not exist in the tree")]
    MissingNode(NodeId),

    /// A branch was requested for an empty record.
    #[error("Cannot build tree branch from an empty record")]
    MissingRecord,

    /// No nesting levels were given.
    #[error("Cannot build tree branch without nesting levels")]
    MissingNestingLevels,

    /// Export was requested before any tree was created.
    #[error("No tree to export. Create a tree first")]
    NoTreeCreated,

    /// Input is not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Stable error type discriminant for adapters and clients.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::DataAttributeMissing { .. } => "DATA_ATTRIBUTE_MISSING",
            Self::InvalidDataStructure(_) => "INVALID_DATA",
            Self::InvalidNestingLevels(_) | Self::MissingNestingLevels => "INVALID_NESTING_LEVELS",
            Self::DuplicateNodesFound(_) => "DUPLICATE_NODES",
            Self::MissingNode(_) => "MISSING_NODE",
            Self::MissingRecord => "MISSING_RECORD",
            Self::NoTreeCreated => "NO_TREE",
            Self::Json(_) => "INVALID_JSON",
        }
    }

    /// Whether the error was caused by the caller's input rather than by misuse of the API.
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::DataAttributeMissing { .. }
                | Self::InvalidDataStructure(_)
                | Self::InvalidNestingLevels(_)
                | Self::MissingNestingLevels
                | Self::DuplicateNodesFound(_)
                | Self::Json(_)
        )
    }
}

/// Result alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
