//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the web adapter is wired together:
//! settings are validated here and handed to the router as shared state.

use anyhow::Result;
use nest_core::{ExportOptions, Settings, validate_settings};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// How exported trees are serialized.
    pub export: ExportOptions,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        validate_settings(settings)?;

        let cors = if settings.allowed_origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(settings.allowed_origins.clone())
        };

        Ok(Self {
            port: settings.effective_port(),
            max_body_bytes: settings.effective_max_body_bytes(),
            export: settings.export_options(),
            cors,
        })
    }

    /// Create config with default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::from_settings(&Settings::with_defaults())
    }

    /// Effective settings as seen by clients.
    pub fn settings(&self) -> Settings {
        Settings {
            export_indent: Some(self.export.indent),
            port: Some(self.port),
            max_body_bytes: Some(self.max_body_bytes),
            allowed_origins: match &self.cors {
                CorsConfig::AllowAll => Vec::new(),
                CorsConfig::AllowOrigins(origins) => origins.clone(),
            },
        }
    }
}

/// Application context for the Axum adapter.
///
/// Read-only after bootstrap; every request builds its own converter.
#[derive(Debug, Clone)]
pub struct AxumContext {
    /// How exported trees are serialized.
    pub export: ExportOptions,
    /// Effective settings, exposed by `/api/settings`.
    pub settings: Settings,
}

/// Bootstrap the Axum context from a server configuration.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let settings = config.settings();
    validate_settings(&settings)?;

    tracing::info!(
        target: "nest.http",
        port = config.port,
        max_body_bytes = config.max_body_bytes,
        export_indent = config.export.indent,
        cors = ?config.cors,
        "Axum bootstrap resolved settings"
    );

    Ok(AxumContext {
        export: config.export,
        settings,
    })
}

/// Start the web server on the configured port.
///
/// Runs until Ctrl+C is received.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors, config.max_body_bytes);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("nest web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("nest web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
