// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime wiring shared by every command.

use std::sync::Arc;

use readlist_client::ApiClient;
use readlist_config::ReadlistConfig;
use readlist_core::ReadlistError;
use readlist_session::{FileCredentialStore, Route, SessionGate, View};
use readlist_store::EntryStore;
use tracing::warn;

use crate::error::CliError;

pub struct Context {
    pub config: ReadlistConfig,
    pub client: ApiClient,
    pub gate: SessionGate,
    pub store: EntryStore,
    pub credentials: Arc<FileCredentialStore>,
}

impl Context {
    /// Opens the credential file, initializes the session gate and builds
    /// the request layer and entry store over it.
    pub fn open(config: ReadlistConfig) -> Result<Self, ReadlistError> {
        let credentials = readlist_session::file_store(&config);
        let client = readlist_client::from_config(&config, credentials.clone())?;

        let mut gate = SessionGate::from_config(&config.session, credentials.clone());
        if let Err(e) = gate.initialize() {
            warn!(
                path = %credentials.path().display(),
                error = %e,
                "ignoring unreadable credential file"
            );
        }

        let store =
            EntryStore::new(Arc::new(client.clone())).with_page_size(config.api.page_size);

        Ok(Self {
            config,
            client,
            gate,
            store,
            credentials,
        })
    }

    /// Entry commands render the dashboard; refuse them when that route
    /// resolves to the login view.
    pub fn require_dashboard(&self) -> Result<(), CliError> {
        match self.gate.resolve_view(Route::Dashboard) {
            View::Dashboard => Ok(()),
            _ => Err(CliError::LoginRequired),
        }
    }
}
