//! Command handlers.
//!
//! Each handler takes the resolved `CliConfig` plus its own arguments,
//! delegates to `nest-core` or `nest-axum`, and formats output for the
//! terminal. Handlers return `CliError` so `main` can pick the exit code.

pub mod convert;
pub mod serve;
