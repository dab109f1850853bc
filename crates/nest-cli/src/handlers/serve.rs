//! Serve command handler.
//!
//! Starts the HTTP adapter with the resolved settings, overlaid with the
//! command's flags.

use nest_axum::{ServerConfig, start_server};

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Flag overrides for the serve command.
#[derive(Debug, Clone, Default)]
pub struct ServeArgs {
    pub port: Option<u16>,
    pub allowed_origins: Vec<String>,
    pub max_body_bytes: Option<usize>,
}

/// Resolve the server configuration for `args` without starting anything.
pub fn server_config(config: &CliConfig, args: ServeArgs) -> Result<ServerConfig, CliError> {
    let mut settings = config.settings().clone();
    if args.port.is_some() {
        settings.port = args.port;
    }
    if args.max_body_bytes.is_some() {
        settings.max_body_bytes = args.max_body_bytes;
    }
    if !args.allowed_origins.is_empty() {
        settings.allowed_origins = args.allowed_origins;
    }

    ServerConfig::from_settings(&settings).map_err(|e| CliError::Config(e.to_string()))
}

/// Execute the serve command. Runs until Ctrl+C.
pub async fn execute(config: &CliConfig, args: ServeArgs) -> Result<(), CliError> {
    let server = server_config(config, args)?;

    println!("Serving nest on http://0.0.0.0:{}", server.port);
    println!("Press Ctrl+C to stop");

    start_server(server)
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}
