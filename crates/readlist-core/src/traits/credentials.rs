// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted credential storage.

use crate::error::ReadlistError;
use crate::types::Credential;

/// Process-wide storage for the access/refresh token pair.
///
/// Read on every outbound request and written only by login and logout.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, or `None` when nothing is stored.
    fn load(&self) -> Result<Option<Credential>, ReadlistError>;

    /// Replaces the stored credential.
    fn save(&self, credential: &Credential) -> Result<(), ReadlistError>;

    /// Erases both tokens. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), ReadlistError>;
}
