// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the service traits, the session gate and the entry store.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Server-assigned entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntryId)
    }
}

/// What kind of item an entry tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryKind {
    Book,
    Article,
    Video,
    Podcast,
    Other,
}

impl EntryKind {
    pub const ALL: [EntryKind; 5] = [
        EntryKind::Book,
        EntryKind::Article,
        EntryKind::Video,
        EntryKind::Podcast,
        EntryKind::Other,
    ];
}

/// Reading progress of an entry.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    ToRead,
    InProgress,
    Completed,
    Archived,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 4] = [
        EntryStatus::ToRead,
        EntryStatus::InProgress,
        EntryStatus::Completed,
        EntryStatus::Archived,
    ];

    /// Human-readable label for list views.
    pub fn label(self) -> &'static str {
        match self {
            EntryStatus::ToRead => "To Read",
            EntryStatus::InProgress => "In Progress",
            EntryStatus::Completed => "Completed",
            EntryStatus::Archived => "Archived",
        }
    }
}

/// An entry as returned by the entry service.
///
/// `id` and `created_at` are assigned by the server and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub kind: EntryKind,
    pub status: EntryStatus,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The payload of the entry form, used for creates and full updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub title: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntryDraft {
    /// Starts a draft with the form defaults (`to_read`, no link, no description).
    pub fn new(title: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            title: title.into(),
            kind,
            status: EntryStatus::default(),
            link: None,
            description: None,
        }
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Prefills a draft from an existing entry (edit form).
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            kind: entry.kind,
            status: entry.status,
            link: entry.link.clone(),
            description: entry.description.clone(),
        }
    }

    /// Trims link/description and treats blank ones as absent.
    pub fn normalized(mut self) -> Self {
        self.link = trimmed_or_none(self.link);
        self.description = trimmed_or_none(self.description);
        self
    }

    /// Checks the draft against the limits the entry service enforces.
    pub fn validate(&self) -> Result<(), crate::ReadlistError> {
        crate::validate::title(&self.title)?;
        if let Some(link) = &self.link {
            crate::validate::link(link)?;
        }
        if let Some(description) = &self.description {
            crate::validate::description(description)?;
        }
        Ok(())
    }
}

/// A partial update. `None` leaves a field untouched; for `link` and
/// `description`, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn link(mut self, link: Option<String>) -> Self {
        self.link = Some(trimmed_or_none(link));
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(trimmed_or_none(description));
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.link.is_none()
            && self.description.is_none()
    }

    /// Validates every field the patch sets.
    pub fn validate(&self) -> Result<(), crate::ReadlistError> {
        if let Some(title) = &self.title {
            crate::validate::title(title)?;
        }
        if let Some(Some(link)) = &self.link {
            crate::validate::link(link)?;
        }
        if let Some(Some(description)) = &self.description {
            crate::validate::description(description)?;
        }
        Ok(())
    }

    /// Applies the patch to a local copy of an entry.
    ///
    /// Used by in-memory service implementations; the entry store itself
    /// never patches its cache.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(kind) = self.kind {
            entry.kind = kind;
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(link) = &self.link {
            entry.link = link.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
    }
}

impl From<EntryDraft> for EntryPatch {
    fn from(draft: EntryDraft) -> Self {
        let draft = draft.normalized();
        Self {
            title: Some(draft.title),
            kind: Some(draft.kind),
            status: Some(draft.status),
            link: Some(draft.link),
            description: Some(draft.description),
        }
    }
}

/// Query parameters for one page of `GET /entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl EntryQuery {
    pub fn first_page(status: Option<EntryStatus>, limit: u32) -> Self {
        Self {
            status,
            limit,
            offset: 0,
        }
    }
}

/// One page of the entry collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPage {
    pub items: Vec<Entry>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Access token plus optional refresh token.
///
/// Debug output never includes the token values.
#[derive(Debug)]
pub struct Credential {
    access_token: SecretString,
    refresh_token: Option<SecretString>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            refresh_token: refresh_token.map(SecretString::from),
        }
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    /// An empty access token grants nothing.
    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().trim().is_empty()
    }
}

/// Login form payload.
#[derive(Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Registration form payload.
#[derive(Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: SecretString,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// The account returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Trims an optional text field; blank becomes absent.
fn trimmed_or_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_display_and_from_str() {
        for status in EntryStatus::ALL {
            let parsed = EntryStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(EntryStatus::InProgress.to_string(), "in_progress");
        assert!(EntryStatus::from_str("done").is_err());
    }

    #[test]
    fn kind_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&EntryKind::Podcast).unwrap();
        assert_eq!(json, "\"podcast\"");
        assert_eq!(EntryKind::from_str("article").unwrap(), EntryKind::Article);
    }

    #[test]
    fn entry_deserializes_with_extra_server_fields() {
        let json = serde_json::json!({
            "id": 7,
            "title": "Dune",
            "kind": "book",
            "status": "in_progress",
            "link": null,
            "description": "desert planet",
            "owner_id": 1,
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-02T10:00:00Z"
        });
        let entry: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.id, EntryId(7));
        assert_eq!(entry.status, EntryStatus::InProgress);
        assert_eq!(entry.link, None);
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn draft_omits_absent_optionals() {
        let draft = EntryDraft::new("Dune", EntryKind::Book);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Dune", "kind": "book", "status": "to_read"})
        );
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let draft = EntryDraft::new("Dune", EntryKind::Book)
            .with_link("   ")
            .with_description("");
        let draft = draft.normalized();
        assert_eq!(draft.link, None);
        assert_eq!(draft.description, None);
    }

    #[test]
    fn normalized_sends_the_trimmed_values_it_validates() {
        let draft = EntryDraft::new("Dune", EntryKind::Book)
            .with_link("  https://dune.example/book \n")
            .with_description("\t a desert planet  ")
            .normalized();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.link.as_deref(), Some("https://dune.example/book"));
        assert_eq!(draft.description.as_deref(), Some("a desert planet"));

        let json = serde_json::to_value(EntryPatch::from(draft)).unwrap();
        assert_eq!(json["link"], "https://dune.example/book");

        let patch = EntryPatch::new().link(Some(" https://x.example ".into()));
        assert_eq!(patch.link, Some(Some("https://x.example".to_string())));
    }

    #[test]
    fn patch_serializes_only_set_fields_and_explicit_clears() {
        let patch = EntryPatch::new()
            .status(EntryStatus::Archived)
            .link(None);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "archived", "link": null})
        );
    }

    #[test]
    fn patch_from_draft_sets_every_field() {
        let draft = EntryDraft::new("Dune", EntryKind::Book).with_link("https://dune.example");
        let patch = EntryPatch::from(draft);
        assert_eq!(patch.title.as_deref(), Some("Dune"));
        assert_eq!(patch.link, Some(Some("https://dune.example".to_string())));
        assert_eq!(patch.description, Some(None));
        assert!(!patch.is_empty());
        assert!(EntryPatch::new().is_empty());
    }

    #[test]
    fn patch_apply_to_updates_local_copy() {
        let mut entry = Entry {
            id: EntryId(1),
            title: "Old".into(),
            kind: EntryKind::Book,
            status: EntryStatus::ToRead,
            link: Some("https://old.example".into()),
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        EntryPatch::new()
            .title("New")
            .status(EntryStatus::Completed)
            .link(None)
            .apply_to(&mut entry);
        assert_eq!(entry.title, "New");
        assert_eq!(entry.status, EntryStatus::Completed);
        assert_eq!(entry.link, None);
        assert_eq!(entry.kind, EntryKind::Book);
    }

    #[test]
    fn credential_requires_non_blank_access_token() {
        assert!(Credential::new("abc", None).has_access_token());
        assert!(!Credential::new("  ", Some("refresh".into())).has_access_token());
    }

    #[test]
    fn credential_debug_hides_tokens() {
        let credential = Credential::new("super-secret-access", Some("super-secret-refresh".into()));
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret-access"));
        assert!(!debug.contains("super-secret-refresh"));
    }

    #[test]
    fn entry_id_parses_from_cli_input() {
        assert_eq!(EntryId::from_str(" 42 ").unwrap(), EntryId(42));
        assert!(EntryId::from_str("abc").is_err());
    }
}
