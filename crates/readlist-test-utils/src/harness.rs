// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness wiring a session gate and an entry store to mock services.
//!
//! `TestHarness` mirrors the client's runtime wiring: one credential store
//! shared by the gate, one entry store over the mock entry service.

use std::sync::Arc;

use readlist_core::{AuthService, EntryDraft, LoginRequest, ReadlistError};
use readlist_session::{MemoryCredentialStore, SessionGate};
use readlist_store::EntryStore;

use crate::mock_auth::MockAuthService;
use crate::mock_service::MockEntryService;

/// Account created by every harness.
pub const TEST_USERNAME: &str = "reader";
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    entries: Vec<EntryDraft>,
    logged_in: bool,
    page_size: u32,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            logged_in: false,
            page_size: EntryStore::DEFAULT_PAGE_SIZE,
        }
    }

    /// Seed the mock service with entries, oldest first.
    pub fn with_entries(mut self, entries: Vec<EntryDraft>) -> Self {
        self.entries = entries;
        self
    }

    /// Start with the test account logged in.
    pub fn logged_in(mut self) -> Self {
        self.logged_in = true;
        self
    }

    /// Page size the entry store uses when fetching.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub async fn build(self) -> Result<TestHarness, ReadlistError> {
        let credentials = Arc::new(MemoryCredentialStore::new());
        let service = MockEntryService::new();
        service.seed_all(self.entries).await;
        let auth = MockAuthService::new()
            .with_account(TEST_USERNAME, TEST_PASSWORD)
            .await;

        let mut gate = SessionGate::new(credentials.clone());
        gate.initialize()?;
        let store = EntryStore::new(Arc::new(service.clone())).with_page_size(self.page_size);

        let mut harness = TestHarness {
            gate,
            store,
            service,
            auth,
            credentials,
        };
        if self.logged_in {
            harness.login(TEST_USERNAME, TEST_PASSWORD).await?;
        }
        Ok(harness)
    }
}

/// A session gate and entry store over in-memory services.
pub struct TestHarness {
    pub gate: SessionGate,
    pub store: EntryStore,
    pub service: MockEntryService,
    pub auth: MockAuthService,
    pub credentials: Arc<MemoryCredentialStore>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Logs in through the mock auth service and establishes the session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ReadlistError> {
        let credential = self
            .auth
            .login(&LoginRequest::new(username, password))
            .await?;
        self.gate.establish(&credential)
    }

    /// A fresh gate over the same credential store, as after a restart.
    pub fn restarted_gate(&self) -> Result<SessionGate, ReadlistError> {
        let mut gate = SessionGate::new(self.credentials.clone());
        gate.initialize()?;
        Ok(gate)
    }
}
