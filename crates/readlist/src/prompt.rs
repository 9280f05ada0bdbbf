// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password and confirmation prompts via TTY or the READLIST_PASSWORD environment variable.

use std::io::{BufRead, IsTerminal, Write};

use readlist_core::{EntryId, ReadlistError};
use secrecy::SecretString;

/// The environment variable name for providing the account password.
pub const PASSWORD_ENV_VAR: &str = "READLIST_PASSWORD";

/// Resolves the password for login or registration.
///
/// Priority:
/// 1. the `--password` flag
/// 2. `READLIST_PASSWORD` (for scripts)
/// 3. an interactive TTY prompt via `rpassword`
pub fn password(flag: Option<String>) -> Result<SecretString, ReadlistError> {
    if let Some(password) = flag
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::stdin().is_terminal() {
        eprint!("Password: ");
        let password = rpassword::read_password().map_err(|e| ReadlistError::Validation {
            field: "password",
            message: format!("failed to read password: {e}"),
        })?;
        if password.is_empty() {
            return Err(ReadlistError::Validation {
                field: "password",
                message: "empty password not allowed".to_string(),
            });
        }
        return Ok(SecretString::from(password));
    }

    Err(ReadlistError::Validation {
        field: "password",
        message: format!(
            "no password provided. Pass --password, set {PASSWORD_ENV_VAR}, or run interactively."
        ),
    })
}

/// Asks on the terminal whether an entry may be deleted. Without a terminal
/// the answer is no.
pub fn confirm_delete(id: EntryId) -> bool {
    if !std::io::stdin().is_terminal() {
        eprintln!("refusing to delete entry {id} without a terminal; pass --yes");
        return false;
    }

    eprint!("Are you sure you want to delete entry {id}? [y/N] ");
    let _ = std::io::stderr().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
