// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `readlist register`, `readlist login` and `readlist logout`.

use readlist_core::{AuthService, LoginRequest, RegisterRequest};
use readlist_session::{Resolution, Route};
use tracing::warn;

use crate::context::Context;
use crate::error::CliError;
use crate::prompt;

/// Creates an account. The new account is not logged in.
pub async fn run_register(
    ctx: &Context,
    email: String,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    if let Resolution::Redirect(_) = ctx.gate.resolve(Route::Register) {
        println!("Already logged in. Run `readlist logout` to register another account.");
        return Ok(());
    }

    let request = RegisterRequest {
        email,
        username,
        password: prompt::password(password)?,
    };
    let profile = ctx.client.register(&request).await?;
    println!(
        "Registered {} <{}>. Log in with `readlist login --username {}`.",
        profile.username, profile.email, profile.username
    );
    Ok(())
}

/// Exchanges username and password for tokens and stores them.
pub async fn run_login(
    ctx: &mut Context,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    if let Resolution::Redirect(_) = ctx.gate.resolve(Route::Login) {
        println!("Already logged in. Run `readlist logout` first to switch accounts.");
        return Ok(());
    }

    let request = LoginRequest {
        username,
        password: prompt::password(password)?,
    };
    let credential = ctx.client.login(&request).await?;
    ctx.gate.establish(&credential)?;
    println!("Logged in as {}.", request.username);
    Ok(())
}

/// Erases the stored tokens.
///
/// The server is told first, while the token is still attached; a failure
/// there is logged and does not prevent the local logout.
pub async fn run_logout(ctx: &mut Context) -> Result<(), CliError> {
    if !ctx.gate.is_authenticated() {
        ctx.gate.logout()?;
        println!("Not logged in.");
        return Ok(());
    }

    if let Err(e) = ctx.client.logout().await {
        warn!(error = %e, "server logout failed; clearing local session anyway");
    }
    ctx.gate.logout()?;
    println!("Logged out.");
    Ok(())
}
