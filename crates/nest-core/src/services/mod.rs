//! Core services.
//!
//! - `converter` - `RecordsToTreeConverter` and the one-shot `convert`

pub mod converter;

pub use converter::{
    EXPORT_JSON_INDENT, ExportOptions, RecordsToTreeConverter, build_branch, convert,
};
