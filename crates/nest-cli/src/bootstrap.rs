//! CLI bootstrap - the composition root.
//!
//! Settings are resolved here once: defaults, overlaid with `NEST_*`
//! environment variables, then validated. Command handlers apply their
//! own flag overrides on top.

use anyhow::Result;
use nest_core::{Settings, validate_settings};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings shared by every command.
    pub settings: Settings,
}

impl CliConfig {
    /// Defaults overlaid with the environment.
    pub fn load() -> Result<Self> {
        Self::from_settings(Settings::from_env()?)
    }

    /// Defaults overlaid with `overrides`.
    pub fn from_settings(overrides: Settings) -> Result<Self> {
        let mut settings = Settings::with_defaults();
        settings.merge(overrides);
        validate_settings(&settings)?;

        tracing::debug!(
            target: "nest.cli",
            export_indent = settings.effective_export_indent(),
            port = settings.effective_port(),
            "CLI settings resolved"
        );

        Ok(Self { settings })
    }

    /// Access the settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}
