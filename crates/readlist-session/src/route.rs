// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! View routing gated on session state.

use serde::Serialize;

use crate::gate::SessionState;

/// A navigable location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
}

impl Route {
    /// Maps a path such as `/dashboard` to a route. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Root),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// A view that can actually be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum View {
    Login,
    Register,
    Dashboard,
}

/// Outcome of resolving one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(Route),
}

/// Resolves a single routing step.
pub fn resolve(state: SessionState, route: Route) -> Resolution {
    match (route, state) {
        (Route::Root, _) => Resolution::Redirect(Route::Dashboard),
        (Route::Login | Route::Register, SessionState::Authenticated) => {
            Resolution::Redirect(Route::Dashboard)
        }
        (Route::Dashboard, SessionState::Unauthenticated) => Resolution::Redirect(Route::Login),
        (Route::Login, SessionState::Unauthenticated) => Resolution::Render(View::Login),
        (Route::Register, SessionState::Unauthenticated) => Resolution::Render(View::Register),
        (Route::Dashboard, SessionState::Authenticated) => Resolution::Render(View::Dashboard),
    }
}

/// Follows redirects until a view renders.
///
/// Every redirect chain terminates within two hops: Root goes to Dashboard,
/// and Dashboard either renders or goes to Login, which renders.
pub fn resolve_view(state: SessionState, route: Route) -> View {
    let mut current = route;
    loop {
        match resolve(state, current) {
            Resolution::Render(view) => return view,
            Resolution::Redirect(next) => current = next,
        }
    }
}
