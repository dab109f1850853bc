//! Conversion request DTOs.

use nest_core::{NestingLevels, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/convert`.
///
/// `records` is kept as raw JSON so the converter reports structural
/// problems with its own error categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub nesting_levels: Vec<String>,
    pub records: Value,
}

impl ConvertRequest {
    pub fn levels(&self) -> Result<NestingLevels> {
        NestingLevels::new(self.nesting_levels.iter().cloned())
    }
}

/// Query string of `POST /api/nest` and `POST /api/render`.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelsQuery {
    /// Comma separated nesting levels, top-most first.
    pub levels: String,
}

impl LevelsQuery {
    pub fn levels(&self) -> Result<NestingLevels> {
        NestingLevels::parse_list(&self.levels)
    }
}
