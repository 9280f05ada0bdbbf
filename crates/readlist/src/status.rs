// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `readlist status` command implementation.
//!
//! Reports the session state from the local credential file. No request is
//! sent to the entry service.

use std::io::IsTerminal;

use readlist_core::{CredentialStore, ReadlistError};
use readlist_security::mask_secret;
use readlist_session::{SessionState, token};
use secrecy::ExposeSecret;
use serde::Serialize;

use crate::context::Context;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: SessionState,
    pub access_token: Option<String>,
    pub has_refresh_token: bool,
    pub token_expires_at: Option<String>,
    pub verify_expiry: bool,
    pub api_base_url: String,
    pub credentials_path: String,
}

impl StatusResponse {
    fn collect(ctx: &Context) -> Self {
        let credential = ctx.credentials.load().ok().flatten();
        let access = credential
            .as_ref()
            .filter(|c| c.has_access_token())
            .map(|c| c.access_token().expose_secret().to_string());

        Self {
            state: ctx.gate.state(),
            access_token: access.as_deref().map(mask_secret),
            has_refresh_token: credential
                .as_ref()
                .is_some_and(|c| c.refresh_token().is_some()),
            token_expires_at: access
                .as_deref()
                .and_then(token::expiry)
                .map(|exp| exp.to_rfc3339()),
            verify_expiry: ctx.config.session.verify_expiry,
            api_base_url: ctx.client.base_url().to_string(),
            credentials_path: ctx.credentials.path().display().to_string(),
        }
    }
}

/// Run the `readlist status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub fn run_status(ctx: &Context, json: bool, plain: bool) -> Result<(), ReadlistError> {
    let status = StatusResponse::collect(ctx);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    print_status(&status, use_color);
    Ok(())
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  readlist status");
    println!("  {}", "-".repeat(35));

    match (status.state, use_color) {
        (SessionState::Authenticated, true) => {
            use colored::Colorize;
            println!("    Session:  {} {}", "✓".green(), "logged in".green());
        }
        (SessionState::Authenticated, false) => println!("    Session:  [OK] logged in"),
        (SessionState::Unauthenticated, true) => {
            use colored::Colorize;
            println!("    Session:  {} {}", "✗".yellow(), "not logged in".yellow());
        }
        (SessionState::Unauthenticated, false) => println!("    Session:  [--] not logged in"),
    }

    if let Some(token) = &status.access_token {
        println!("    Token:    {token}");
    }
    if let Some(exp) = &status.token_expires_at {
        println!("    Expires:  {exp}");
    }
    println!("    Endpoint: {}", status.api_base_url);
    println!("    Tokens:   {}", status.credentials_path);
    println!();

    if status.state == SessionState::Unauthenticated {
        println!("  Log in with: readlist login --username <name>");
        println!();
    }
}
