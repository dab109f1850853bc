#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod services;
pub mod settings;
pub mod tree;

// Re-export commonly used types for convenience
pub use domain::{MAX_NESTING_LEVELS, NestingLevels, NodeKey, Record};
pub use error::{ConvertError, Result};
pub use services::{
    EXPORT_JSON_INDENT, ExportOptions, RecordsToTreeConverter, build_branch, convert,
};
pub use settings::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT, Settings, SettingsError, validate_settings,
};
pub use tree::{Node, NodeId, NodeTree};
