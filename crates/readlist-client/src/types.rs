// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types that only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};

/// Error body returned by the entry service: `{"error": {"code", "message", "details"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// The `error` object of an [`ApiErrorResponse`].
///
/// `message` is usually a string but the service passes some framework
/// errors through unchanged, so any JSON value is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Extracts a displayable message, ignoring empty or non-string values.
    pub fn message(&self) -> Option<String> {
        match &self.error.message {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// `POST /auth/login` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `POST /auth/login` body.
#[derive(Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /auth/register` body.
#[derive(Serialize)]
pub struct RegisterBody<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}
