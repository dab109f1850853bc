//! Settings DTOs.

use nest_core::Settings;
use serde::{Deserialize, Serialize};

/// Effective server settings DTO for HTTP API.
///
/// Unlike `Settings`, every field is resolved to its effective value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    /// Spaces per indentation level in exported JSON.
    pub export_indent: usize,
    /// Port the server was configured with.
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Origins allowed by CORS. Omitted when any origin is allowed.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub allowed_origins: Vec<String>,
}

impl From<&Settings> for SettingsDto {
    fn from(settings: &Settings) -> Self {
        Self {
            export_indent: settings.effective_export_indent(),
            port: settings.effective_port(),
            max_body_bytes: settings.effective_max_body_bytes(),
            allowed_origins: settings.allowed_origins.clone(),
        }
    }
}
