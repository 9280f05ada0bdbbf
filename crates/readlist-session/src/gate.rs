// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state machine.
//!
//! The gate owns the credential lifecycle. It is `Authenticated` exactly when
//! the credential store holds a non-empty access token (and, with expiry
//! checking on, that token has not passed its `exp` claim). Transitions only
//! happen through [`SessionGate::initialize`], [`SessionGate::login`] and
//! [`SessionGate::logout`].

use std::sync::Arc;

use chrono::Utc;
use readlist_config::model::SessionConfig;
use readlist_core::{Credential, CredentialStore, ReadlistError};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::route::{self, Resolution, Route, View};
use crate::token;

/// The two session states. There is no intermediate "authenticating" state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Credential lifecycle and route gate.
pub struct SessionGate {
    store: Arc<dyn CredentialStore>,
    state: SessionState,
    verify_expiry: bool,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.state)
            .field("verify_expiry", &self.verify_expiry)
            .finish_non_exhaustive()
    }
}

impl SessionGate {
    /// Creates a gate in the `Unauthenticated` state. Call
    /// [`initialize`](Self::initialize) to pick up a persisted credential.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            state: SessionState::Unauthenticated,
            verify_expiry: false,
        }
    }

    pub fn from_config(config: &SessionConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self::new(store).with_expiry_check(config.verify_expiry)
    }

    /// Treat a stored JWT whose `exp` has passed as absent.
    pub fn with_expiry_check(mut self, enabled: bool) -> Self {
        self.verify_expiry = enabled;
        self
    }

    /// Reads the persisted credential and derives the initial state.
    ///
    /// No network call is made. On a store error the gate stays
    /// `Unauthenticated` and the error is returned.
    pub fn initialize(&mut self) -> Result<SessionState, ReadlistError> {
        self.state = SessionState::Unauthenticated;
        let credential = self.store.load()?;
        self.state = match credential {
            Some(credential) if self.trusts(&credential) => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        };
        debug!(state = %self.state, "session initialized");
        Ok(self.state)
    }

    /// Persists the token pair and transitions to `Authenticated`.
    pub fn login(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<(), ReadlistError> {
        let credential = Credential::new(access_token, refresh_token);
        self.establish(&credential)
    }

    /// Persists an already-built credential (the result of
    /// [`AuthService::login`](readlist_core::AuthService::login)) and
    /// transitions to `Authenticated`.
    pub fn establish(&mut self, credential: &Credential) -> Result<(), ReadlistError> {
        if !credential.has_access_token() {
            return Err(ReadlistError::Validation {
                field: "access_token",
                message: "access token must not be empty".into(),
            });
        }
        self.store.save(credential)?;
        self.state = SessionState::Authenticated;
        info!("session established");
        Ok(())
    }

    /// Erases both persisted tokens and transitions to `Unauthenticated`.
    ///
    /// The state becomes `Unauthenticated` even if erasing fails; the error
    /// is still returned so the caller can report it.
    pub fn logout(&mut self) -> Result<(), ReadlistError> {
        self.state = SessionState::Unauthenticated;
        match self.store.clear() {
            Ok(()) => {
                info!("session ended");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to erase stored credential");
                Err(e)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// One routing step for the current state.
    pub fn resolve(&self, route: Route) -> Resolution {
        route::resolve(self.state, route)
    }

    /// The view that finally renders for `route` after following redirects.
    pub fn resolve_view(&self, route: Route) -> View {
        route::resolve_view(self.state, route)
    }

    fn trusts(&self, credential: &Credential) -> bool {
        if !credential.has_access_token() {
            return false;
        }
        if self.verify_expiry && token::is_expired(credential.access_token().expose_secret(), Utc::now()) {
            info!("stored access token has expired");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryCredentialStore;

    fn gate() -> (SessionGate, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        (SessionGate::new(store.clone()), store)
    }

    #[test]
    fn starts_unauthenticated() {
        let (gate, _) = gate();
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn login_then_fresh_gate_initializes_authenticated() {
        let (mut gate, store) = gate();
        gate.login("T", Some("R".into())).unwrap();
        assert!(gate.is_authenticated());

        let mut fresh = SessionGate::new(store);
        assert_eq!(fresh.initialize().unwrap(), SessionState::Authenticated);
    }

    #[test]
    fn logout_clears_both_tokens() {
        let (mut gate, store) = gate();
        gate.login("T", Some("R".into())).unwrap();
        gate.logout().unwrap();

        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(store.load().unwrap().is_none());
        let mut fresh = SessionGate::new(store);
        assert_eq!(fresh.initialize().unwrap(), SessionState::Unauthenticated);
    }

    #[test]
    fn refresh_token_alone_does_not_authenticate() {
        let (mut gate, store) = gate();
        store.save(&Credential::new("", Some("R".into()))).unwrap();
        assert_eq!(gate.initialize().unwrap(), SessionState::Unauthenticated);
    }

    #[test]
    fn empty_access_token_login_is_rejected() {
        let (mut gate, store) = gate();
        let err = gate.login("  ", None).unwrap_err();
        assert!(matches!(err, ReadlistError::Validation { field: "access_token", .. }));
        assert!(!gate.is_authenticated());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn expired_token_trusted_unless_expiry_check_enabled() {
        let (_, store) = gate();
        store
            .save(&Credential::new(token::jwt_with_exp(1_000), None))
            .unwrap();

        let mut lenient = SessionGate::new(store.clone());
        assert_eq!(lenient.initialize().unwrap(), SessionState::Authenticated);

        let mut strict = SessionGate::new(store).with_expiry_check(true);
        assert_eq!(strict.initialize().unwrap(), SessionState::Unauthenticated);
    }

    #[test]
    fn unexpired_token_passes_expiry_check() {
        let (_, store) = gate();
        let exp = Utc::now().timestamp() + 3600;
        store
            .save(&Credential::new(token::jwt_with_exp(exp), None))
            .unwrap();
        let mut gate = SessionGate::new(store).with_expiry_check(true);
        assert_eq!(gate.initialize().unwrap(), SessionState::Authenticated);
    }

    #[test]
    fn routing_follows_state() {
        let (mut gate, _) = gate();
        assert_eq!(gate.resolve_view(Route::Root), View::Login);
        gate.login("T", None).unwrap();
        assert_eq!(gate.resolve(Route::Login), Resolution::Redirect(Route::Dashboard));
        assert_eq!(gate.resolve_view(Route::Root), View::Dashboard);
        gate.logout().unwrap();
        assert_eq!(gate.resolve_view(Route::Dashboard), View::Login);
    }

    #[test]
    fn state_displays_snake_case() {
        assert_eq!(SessionState::Authenticated.to_string(), "authenticated");
        assert_eq!(SessionState::Unauthenticated.to_string(), "unauthenticated");
    }

    #[test]
    #[tracing_test::traced_test]
    fn transitions_are_logged() {
        let (mut gate, _) = gate();
        gate.login("T", None).unwrap();
        gate.logout().unwrap();
        assert!(logs_contain("session established"));
        assert!(logs_contain("session ended"));
    }
}
