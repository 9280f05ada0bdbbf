// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared request layer for the entry service.
//!
//! [`ApiClient`] builds URLs under the configured base, attaches the stored
//! bearer token to authenticated requests, and maps non-success responses
//! to [`ReadlistError::Api`] carrying the server's `error.message`.

use std::sync::Arc;
use std::time::Duration;

use readlist_config::model::ApiConfig;
use readlist_core::{CredentialStore, ReadlistError};
use readlist_security::redact;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::ApiErrorResponse;

/// HTTP client for the entry service.
///
/// Cloning is cheap: the connection pool and the credential store are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for the configured service.
    ///
    /// The credential store is read on every authenticated request, so a
    /// login or logout through the session gate takes effect immediately.
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self, ReadlistError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("readlist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReadlistError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: parse_base_url(&config.base_url)?,
            credentials,
        })
    }

    /// Points the client at another base URL (wiremock servers in tests).
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ReadlistError> {
        self.base_url = parse_base_url(url)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a path such as `entries/5` against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ReadlistError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ReadlistError::Internal(format!("invalid endpoint path `{path}`: {e}")))
    }

    /// Starts a request that carries no credential.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Starts a request with `Authorization: Bearer <token>` when a token is stored.
    pub(crate) fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder, ReadlistError> {
        let builder = self.http.request(method, url);
        let Some(credential) = self.credentials.load()? else {
            return Ok(builder);
        };
        if !credential.has_access_token() {
            return Ok(builder);
        }

        let mut value = HeaderValue::from_str(&format!(
            "Bearer {}",
            credential.access_token().expose_secret()
        ))
        .map_err(|_| ReadlistError::Config("stored access token is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(builder.header(AUTHORIZATION, value))
    }

    /// Sends a request and decodes a JSON body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ReadlistError> {
        let body = self.send(builder).await?;
        serde_json::from_str(&body).map_err(|e| ReadlistError::Decode(e.to_string()))
    }

    /// Sends a request whose success body is irrelevant (204 deletes, logout).
    pub(crate) async fn execute_empty(&self, builder: RequestBuilder) -> Result<(), ReadlistError> {
        self.send(builder).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, ReadlistError> {
        let request = builder.build().map_err(transport_error)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(transport_error)?;
        let status = response.status();
        debug!(%method, %path, status = status.as_u16(), "entry service response");

        let body = response.text().await.map_err(transport_error)?;
        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message());
        warn!(
            %method,
            %path,
            status = status.as_u16(),
            body = %redact(&body, &[]),
            "entry service request failed"
        );
        Err(ReadlistError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Parses the base URL and guarantees a trailing slash so `join` appends
/// instead of replacing the last segment.
fn parse_base_url(raw: &str) -> Result<Url, ReadlistError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw)
        .map_err(|e| ReadlistError::Config(format!("invalid api.base_url `{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ReadlistError::Config(format!(
            "api.base_url must use http or https, got `{other}`"
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> ReadlistError {
    ReadlistError::Transport {
        message: redact(&e.to_string(), &[]),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readlist_core::Credential;
    use readlist_session::MemoryCredentialStore;

    fn client_with(store: Arc<dyn CredentialStore>, base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::default(), store)
            .unwrap()
            .with_base_url(base)
            .unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let client = client_with(
            Arc::new(MemoryCredentialStore::new()),
            "https://reading.example/api/v1",
        );
        assert_eq!(
            client.endpoint("entries/5").unwrap().as_str(),
            "https://reading.example/api/v1/entries/5"
        );
        assert_eq!(
            client.endpoint("/auth/login").unwrap().as_str(),
            "https://reading.example/api/v1/auth/login"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(parse_base_url("ftp://reading.example").is_err());
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("http://localhost:8000/api/v1/").is_ok());
    }

    #[test]
    fn authorized_attaches_stored_token() {
        let store = Arc::new(MemoryCredentialStore::new());
        store
            .save(&Credential::new("token-abc", None))
            .unwrap();
        let client = client_with(store, "http://localhost:8000/api/v1");
        let url = client.endpoint("entries").unwrap();
        let request = client
            .authorized(Method::GET, url)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer token-abc"
        );
    }

    #[test]
    fn authorized_without_token_sends_no_header() {
        let client = client_with(
            Arc::new(MemoryCredentialStore::new()),
            "http://localhost:8000/api/v1",
        );
        let url = client.endpoint("entries").unwrap();
        let request = client
            .authorized(Method::GET, url)
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn debug_output_omits_credentials() {
        let client = client_with(
            Arc::new(MemoryCredentialStore::new()),
            "http://localhost:8000/api/v1",
        );
        let debug = format!("{client:?}");
        assert!(debug.contains("localhost:8000"));
    }
}
