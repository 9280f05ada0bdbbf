// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side inspection of JWT access tokens.
//!
//! The signature is not verified: the server remains the authority. The only
//! use is treating a token whose `exp` claim has passed as absent when
//! `session.verify_expiry` is enabled.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Returns the `exp` claim of a JWT, or `None` when the token is opaque,
/// malformed, or carries no expiry.
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}

/// True only when the token carries an `exp` claim at or before `now`.
///
/// Tokens without a readable expiry are never considered expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    expiry(token).is_some_and(|exp| exp <= now)
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"1","exp":{exp}}}"#));
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_exp_claim() {
        let token = jwt_with_exp(1_700_000_000);
        assert_eq!(expiry(&token).unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn past_exp_is_expired() {
        let token = jwt_with_exp(1_000);
        assert!(is_expired(&token, Utc::now()));
    }

    #[test]
    fn future_exp_is_not_expired() {
        let token = jwt_with_exp(Utc::now().timestamp() + 3600);
        assert!(!is_expired(&token, Utc::now()));
    }

    #[test]
    fn opaque_tokens_are_trusted() {
        assert_eq!(expiry("plain-opaque-token"), None);
        assert!(!is_expired("plain-opaque-token", Utc::now()));
        assert!(!is_expired("a.b.c", Utc::now()));
        assert!(!is_expired("a.b.c.d", Utc::now()));
    }

    #[test]
    fn token_without_exp_is_trusted() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#);
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig");
        assert_eq!(expiry(&token), None);
    }
}
