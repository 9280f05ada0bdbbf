// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service trait definitions at the seams between the core, the HTTP client
//! and the local credential storage.
//!
//! Remote services use `#[async_trait]` for dynamic dispatch compatibility.

pub mod auth;
pub mod credentials;
pub mod entries;

pub use auth::AuthService;
pub use credentials::CredentialStore;
pub use entries::EntryService;
