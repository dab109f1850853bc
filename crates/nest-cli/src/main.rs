//! CLI entry point - the composition root.
//!
//! Settings are resolved once via `CliConfig::load` and handed to the
//! command handlers. Logs go to stderr so stdout carries only the tree.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use nest_cli::handlers::{convert, serve};
use nest_cli::{Cli, CliConfig, CliError, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI configuration (composition root)
    let config = CliConfig::load().map_err(|e| CliError::Config(e.to_string()))?;

    match command {
        Commands::Convert {
            levels,
            input,
            output,
            render,
            indent,
        } => convert::execute(
            &config,
            convert::ConvertArgs {
                levels,
                input,
                output,
                render,
                indent,
            },
        ),
        Commands::Serve {
            port,
            allowed_origins,
            max_body_bytes,
        } => {
            serve::execute(
                &config,
                serve::ServeArgs {
                    port,
                    allowed_origins,
                    max_body_bytes,
                },
            )
            .await
        }
    }
}
