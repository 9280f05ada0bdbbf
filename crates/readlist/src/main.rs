// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Readlist - a command-line client for a personal reading list.
//!
//! This is the binary entry point.

mod auth;
mod context;
mod entries;
mod error;
mod prompt;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use readlist_core::{EntryId, EntryStatus};

use crate::context::Context;
use crate::entries::{AddArgs, EditArgs};
use crate::error::CliError;

/// Readlist - track what you want to read, watch and listen to.
#[derive(Parser, Debug)]
#[command(name = "readlist", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted (or read from READLIST_PASSWORD).
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and store the access token.
    Login {
        #[arg(long)]
        username: String,
        /// Prompted for when omitted (or read from READLIST_PASSWORD).
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored tokens.
    Logout,
    /// Show session state and configured endpoint.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// List entries, optionally filtered by status.
    List {
        #[arg(long)]
        status: Option<EntryStatus>,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Show one entry.
    Show {
        id: EntryId,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add an entry.
    Add(AddArgs),
    /// Change fields of an entry.
    Edit {
        id: EntryId,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete an entry.
    Delete {
        id: EntryId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => readlist_config::load_and_validate_path(path),
        None => readlist_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            readlist_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let mut ctx = match Context::open(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, &mut ctx).await {
        eprintln!("error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands, ctx: &mut Context) -> Result<(), CliError> {
    match command {
        Commands::Register {
            email,
            username,
            password,
        } => auth::run_register(ctx, email, username, password).await,
        Commands::Login { username, password } => auth::run_login(ctx, username, password).await,
        Commands::Logout => auth::run_logout(ctx).await,
        Commands::Status { json, plain } => Ok(status::run_status(ctx, json, plain)?),
        Commands::List { status, json, plain } => {
            entries::run_list(ctx, status, json, plain).await
        }
        Commands::Show { id, json } => entries::run_show(ctx, id, json).await,
        Commands::Add(args) => entries::run_add(ctx, args).await,
        Commands::Edit { id, fields } => entries::run_edit(ctx, id, fields).await,
        Commands::Delete { id, yes } => entries::run_delete(ctx, id, yes).await,
    }
}

/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "readlist={log_level},readlist_client={log_level},readlist_session={log_level},readlist_store={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_parses_status_filter() {
        let cli = Cli::try_parse_from(["readlist", "list", "--status", "in_progress"]).unwrap();
        match cli.command {
            Commands::List { status, .. } => assert_eq!(status, Some(EntryStatus::InProgress)),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["readlist", "list", "--status", "someday"]).is_err());
    }

    #[test]
    fn add_defaults_to_to_read() {
        let cli = Cli::try_parse_from([
            "readlist", "add", "--title", "Dune", "--kind", "book",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.status, EntryStatus::ToRead);
                assert_eq!(args.title, "Dune");
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn edit_rejects_link_and_clear_link_together() {
        let parsed = Cli::try_parse_from([
            "readlist",
            "edit",
            "5",
            "--link",
            "https://example.com",
            "--clear-link",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["readlist", "status", "--config", "/tmp/readlist.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/readlist.toml")));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = readlist_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
    }
}
