// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the readlist client.

use thiserror::Error;

/// The primary error type used across all readlist service traits and core operations.
#[derive(Debug, Error)]
pub enum ReadlistError {
    /// Configuration errors (invalid base URL, unreadable settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// A draft or patch failed local validation; no request was sent.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The entry service answered with a non-success status.
    ///
    /// `message` carries the server-supplied `error.message` when the body had one.
    #[error("{}", api_error_display(*status, message.as_deref()))]
    Api { status: u16, message: Option<String> },

    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Credential store errors (unreadable or unwritable credential file).
    #[error("credential storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ReadlistError {
    /// Returns the message supplied by the server, if this error carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ReadlistError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code for errors produced by a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReadlistError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the stored credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ReadlistError::Api { status: 401, .. })
    }
}

fn api_error_display(status: u16, message: Option<&str>) -> String {
    match message {
        Some(m) => format!("entry service returned {status}: {m}"),
        None => format!("entry service returned {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_only_for_api_errors() {
        let api = ReadlistError::Api {
            status: 422,
            message: Some("Title is required".into()),
        };
        assert_eq!(api.server_message(), Some("Title is required"));
        assert_eq!(api.status(), Some(422));

        let transport = ReadlistError::Transport {
            message: "connection refused".into(),
            source: None,
        };
        assert_eq!(transport.server_message(), None);
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn api_error_display_with_and_without_message() {
        let with = ReadlistError::Api {
            status: 400,
            message: Some("bad".into()),
        };
        assert_eq!(with.to_string(), "entry service returned 400: bad");

        let without = ReadlistError::Api {
            status: 503,
            message: None,
        };
        assert_eq!(without.to_string(), "entry service returned 503");
    }

    #[test]
    fn only_401_counts_as_unauthorized() {
        assert!(
            ReadlistError::Api {
                status: 401,
                message: None
            }
            .is_unauthorized()
        );
        assert!(
            !ReadlistError::Api {
                status: 403,
                message: None
            }
            .is_unauthorized()
        );
    }
}
