#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use tempfile as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

pub use bootstrap::CliConfig;
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
