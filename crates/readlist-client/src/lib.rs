// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP implementation of the readlist service traits.
//!
//! [`ApiClient`] is the shared request layer: it implements both
//! [`readlist_core::EntryService`] and [`readlist_core::AuthService`] and
//! attaches whatever access token the credential store currently holds.

pub mod auth;
pub mod client;
pub mod entries;
pub mod types;

use std::sync::Arc;

use readlist_config::ReadlistConfig;
use readlist_core::{CredentialStore, ReadlistError};
use tracing::info;

pub use client::ApiClient;

/// Builds the request layer from a loaded configuration.
pub fn from_config(
    config: &ReadlistConfig,
    credentials: Arc<dyn CredentialStore>,
) -> Result<ApiClient, ReadlistError> {
    let client = ApiClient::new(&config.api, credentials)?;
    info!(base_url = %client.base_url(), "entry service client initialized");
    Ok(client)
}
