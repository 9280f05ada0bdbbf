// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors surfaced by CLI commands.

use readlist_core::ReadlistError;
use readlist_store::{PageError, SharedError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Readlist(#[from] ReadlistError),

    /// A page-level failure (list or delete), reported with the banner text.
    #[error("{banner}: {source}")]
    Page {
        banner: PageError,
        #[source]
        source: SharedError,
    },

    /// The entry form was rejected; the message is what the form shows.
    #[error("{0}")]
    Form(String),

    /// The dashboard route resolved to the login view.
    #[error("not logged in")]
    LoginRequired,
}

impl CliError {
    /// A follow-up hint for the user, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        let unauthorized = match self {
            CliError::Readlist(e) => e.is_unauthorized(),
            CliError::Page { source, .. } => source.is_unauthorized(),
            CliError::LoginRequired => true,
            CliError::Form(_) => false,
        };
        unauthorized.then_some("run `readlist login --username <name>` to sign in")
    }
}
