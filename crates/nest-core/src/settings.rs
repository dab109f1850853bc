//! Settings domain types and validation.
//!
//! Settings are shared by the HTTP and CLI adapters. Every field is
//! optional; `effective_*` accessors fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::services::{EXPORT_JSON_INDENT, ExportOptions};

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 9797;

/// Default request body limit (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;
const MAX_INDENT: usize = 16;

/// Environment variables read by [`Settings::from_env`].
pub const ENV_EXPORT_INDENT: &str = "NEST_EXPORT_INDENT";
pub const ENV_PORT: &str = "NEST_PORT";
pub const ENV_MAX_BODY_BYTES: &str = "NEST_MAX_BODY_BYTES";
pub const ENV_ALLOWED_ORIGINS: &str = "NEST_ALLOWED_ORIGINS";

/// Application settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Spaces per indentation level in exported JSON.
    pub export_indent: Option<usize>,

    /// Port for the HTTP server.
    pub port: Option<u16>,

    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: Option<usize>,

    /// Origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            export_indent: Some(EXPORT_JSON_INDENT),
            port: Some(DEFAULT_PORT),
            max_body_bytes: Some(DEFAULT_MAX_BODY_BYTES),
            allowed_origins: Vec::new(),
        }
    }

    /// Read settings from `NEST_*` environment variables.
    ///
    /// Unset variables stay `None`; malformed values are errors.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup(ENV_ALLOWED_ORIGINS)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            export_indent: parse_var(&lookup, ENV_EXPORT_INDENT)?,
            port: parse_var(&lookup, ENV_PORT)?,
            max_body_bytes: parse_var(&lookup, ENV_MAX_BODY_BYTES)?,
            allowed_origins,
        })
    }

    /// Get the effective export indent (with default fallback).
    #[must_use]
    pub fn effective_export_indent(&self) -> usize {
        self.export_indent.unwrap_or(EXPORT_JSON_INDENT)
    }

    /// Get the effective server port (with default fallback).
    #[must_use]
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Get the effective body limit (with default fallback).
    #[must_use]
    pub fn effective_max_body_bytes(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Export options derived from these settings.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            indent: self.effective_export_indent(),
        }
    }

    /// Overlay the fields set in `other` on top of these settings.
    pub fn merge(&mut self, other: Self) {
        if other.export_indent.is_some() {
            self.export_indent = other.export_indent;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.max_body_bytes.is_some() {
            self.max_body_bytes = other.max_body_bytes;
        }
        if !other.allowed_origins.is_empty() {
            self.allowed_origins = other.allowed_origins;
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, SettingsError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| SettingsError::InvalidEnvValue {
                    key: key.to_string(),
                    value,
                })
        })
        .transpose()
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Export indent must be at most 16, got {0}")]
    InvalidIndent(usize),

    #[error("Port should be >= 1024 (privileged ports require root), got {0}")]
    InvalidPort(u16),

    #[error("Body limit must be between 1 KiB and 64 MiB, got {0} bytes")]
    InvalidBodyLimit(usize),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnvValue { key: String, value: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(indent) = settings.export_indent {
        if indent > MAX_INDENT {
            return Err(SettingsError::InvalidIndent(indent));
        }
    }

    if let Some(port) = settings.port {
        if port < 1024 {
            return Err(SettingsError::InvalidPort(port));
        }
    }

    if let Some(limit) = settings.max_body_bytes {
        if !(MIN_BODY_BYTES..=MAX_BODY_BYTES).contains(&limit) {
            return Err(SettingsError::InvalidBodyLimit(limit));
        }
    }

    Ok(())
}
