// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session handling for the readlist client.
//!
//! [`SessionGate`] decides whether the user is authenticated from the
//! persisted credential, and which view a route resolves to. Credential
//! persistence is pluggable through [`CredentialStore`](readlist_core::CredentialStore).

pub mod credentials;
pub mod gate;
pub mod route;
pub mod token;

pub use credentials::{FileCredentialStore, MemoryCredentialStore};
pub use gate::{SessionGate, SessionState};
pub use route::{Resolution, Route, View};

use std::sync::Arc;

use readlist_config::model::ReadlistConfig;

/// Opens the file credential store named by the configuration.
pub fn file_store(config: &ReadlistConfig) -> Arc<FileCredentialStore> {
    Arc::new(FileCredentialStore::new(config.session.credentials_path()))
}
