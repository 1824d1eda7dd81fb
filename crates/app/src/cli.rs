//! Command line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use passage_infrastructure::ClientConfig;

/// Sign in to a backend and make authenticated requests.
#[derive(Parser)]
#[command(name = "passage")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags that take precedence over every other configuration source.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Configuration file (default: ./passage.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Token store file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    /// Applies the flags that were given to `config`.
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(store) = &self.store {
            config.store_path = Some(store.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an account (does not sign in)
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "PASSAGE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in and remember the session
    SignIn {
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password
        #[arg(long, env = "PASSAGE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    SignOut,

    /// Restore the stored session and show who is signed in
    Status,

    /// GET a protected path with the stored session
    Get {
        /// Path relative to the base URL, or an absolute URL
        path: String,
    },
}
