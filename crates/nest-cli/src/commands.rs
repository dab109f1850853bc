//! Main commands enum.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Group a JSON list of records into a tree
    #[command(
        after_help = "EXAMPLES:\n    cat records.json | nest convert currency country city\n    nest convert --input records.json --render currency country"
    )]
    Convert {
        /// Nesting levels (record attributes), top-most first
        #[arg(required = true, num_args = 1..)]
        levels: Vec<String>,
        /// Read records from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the tree to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the tree as text instead of JSON
        #[arg(long)]
        render: bool,
        /// Spaces per indentation level in the JSON output
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Serve the converter over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "NEST_PORT")]
        port: Option<u16>,
        /// Origin allowed by CORS (repeatable; default allows any)
        #[arg(long = "allowed-origin", action = clap::ArgAction::Append)]
        allowed_origins: Vec<String>,
        /// Maximum request body size in bytes
        #[arg(long)]
        max_body_bytes: Option<usize>,
    },
}
