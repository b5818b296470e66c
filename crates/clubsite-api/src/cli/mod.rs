//! CLI command definitions for the `clubsite` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod admin;
pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Club website with a content-aware chat assistant.
#[derive(Parser)]
#[command(name = "clubsite", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to the site configuration file.
    #[arg(
        long,
        global = true,
        env = "CLUBSITE_CONFIG",
        default_value = "clubsite.toml"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage admin accounts.
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Talk to the assistant from the terminal.
    Chat,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create an admin account (no-op if the username exists).
    Create {
        username: String,

        /// Password (prompted with confirmation when omitted).
        #[arg(long, env = "CLUBSITE_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Set a new password for an existing admin.
    ResetPassword {
        username: String,

        /// New password (prompted with confirmation when omitted).
        #[arg(long, env = "CLUBSITE_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}
