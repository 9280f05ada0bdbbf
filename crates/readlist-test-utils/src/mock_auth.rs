// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory auth service.
//!
//! Accounts live in a map; a successful login issues `access-<username>` and
//! `refresh-<username>` tokens.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::sync::Mutex;

use readlist_core::{
    AuthService, Credential, LoginRequest, ReadlistError, RegisterRequest, UserProfile,
};

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, (String, UserProfile)>,
    logins: usize,
    logouts: usize,
    fail_logout: bool,
}

#[derive(Clone, Default)]
pub struct MockAuthService {
    inner: Arc<Mutex<Inner>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account directly.
    pub async fn with_account(self, username: &str, password: &str) -> Self {
        {
            let mut inner = self.inner.lock().await;
            let profile = profile(inner.accounts.len() as i64 + 1, username, &format!("{username}@example.com"));
            inner
                .accounts
                .insert(username.to_string(), (password.to_string(), profile));
        }
        self
    }

    /// Makes every logout call fail with a 500.
    pub async fn fail_logout(&self) {
        self.inner.lock().await.fail_logout = true;
    }

    pub async fn login_count(&self) -> usize {
        self.inner.lock().await.logins
    }

    pub async fn logout_count(&self) -> usize {
        self.inner.lock().await.logouts
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ReadlistError> {
        let mut inner = self.inner.lock().await;
        if inner.accounts.contains_key(&request.username) {
            return Err(ReadlistError::Api {
                status: 409,
                message: Some("Username already registered".to_string()),
            });
        }
        let profile = profile(
            inner.accounts.len() as i64 + 1,
            &request.username,
            &request.email,
        );
        inner.accounts.insert(
            request.username.clone(),
            (
                request.password.expose_secret().to_string(),
                profile.clone(),
            ),
        );
        Ok(profile)
    }

    async fn login(&self, request: &LoginRequest) -> Result<Credential, ReadlistError> {
        let mut inner = self.inner.lock().await;
        inner.logins += 1;
        match inner.accounts.get(&request.username) {
            Some((password, _)) if password == request.password.expose_secret() => {
                Ok(Credential::new(
                    format!("access-{}", request.username),
                    Some(format!("refresh-{}", request.username)),
                ))
            }
            _ => Err(ReadlistError::Api {
                status: 401,
                message: Some("Invalid username or password".to_string()),
            }),
        }
    }

    async fn logout(&self) -> Result<(), ReadlistError> {
        let mut inner = self.inner.lock().await;
        inner.logouts += 1;
        if inner.fail_logout {
            return Err(ReadlistError::Api {
                status: 500,
                message: None,
            });
        }
        Ok(())
    }
}

fn profile(id: i64, username: &str, email: &str) -> UserProfile {
    UserProfile {
        id,
        email: email.to_string(),
        username: username.to_string(),
        role: Some("user".to_string()),
        is_active: true,
        created_at: Utc::now(),
    }
}
