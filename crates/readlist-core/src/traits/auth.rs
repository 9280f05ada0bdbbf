// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication endpoints of the remote service.

use async_trait::async_trait;

use crate::error::ReadlistError;
use crate::types::{Credential, LoginRequest, RegisterRequest, UserProfile};

/// Account registration, login and server-side logout.
///
/// Implementations never touch the local credential store; persisting the
/// returned [`Credential`] is the session gate's job.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account.
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ReadlistError>;

    /// Exchanges username and password for an access/refresh token pair.
    async fn login(&self, request: &LoginRequest) -> Result<Credential, ReadlistError>;

    /// Notifies the server that the current token is no longer in use.
    async fn logout(&self) -> Result<(), ReadlistError>;
}
