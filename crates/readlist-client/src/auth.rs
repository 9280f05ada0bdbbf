// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`AuthService`] over HTTP.

use async_trait::async_trait;
use readlist_core::{AuthService, Credential, LoginRequest, ReadlistError, RegisterRequest, UserProfile};
use reqwest::Method;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::client::ApiClient;
use crate::types::{LoginBody, RegisterBody, TokenResponse};

#[async_trait]
impl AuthService for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ReadlistError> {
        let url = self.endpoint("auth/register")?;
        let body = RegisterBody {
            email: &request.email,
            username: &request.username,
            password: request.password.expose_secret(),
        };
        self.execute(self.request(Method::POST, url).json(&body)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<Credential, ReadlistError> {
        let url = self.endpoint("auth/login")?;
        let body = LoginBody {
            username: &request.username,
            password: request.password.expose_secret(),
        };
        let tokens: TokenResponse = self.execute(self.request(Method::POST, url).json(&body)).await?;
        debug!(token_type = tokens.token_type.as_deref().unwrap_or("bearer"), "login accepted");
        Ok(Credential::new(tokens.access_token, tokens.refresh_token))
    }

    async fn logout(&self) -> Result<(), ReadlistError> {
        let url = self.endpoint("auth/logout")?;
        self.execute_empty(self.authorized(Method::POST, url)?).await
    }
}
