// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pending-edit slot and the two error channels a view renders.

use readlist_core::{Entry, EntryDraft, EntryId, EntryKind};
use serde::Serialize;

/// Which form, if any, is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "entry", rename_all = "snake_case")]
pub enum EditSlot {
    #[default]
    Closed,
    Create,
    Edit(Entry),
}

impl EditSlot {
    /// The form is visible exactly when the slot is not `Closed`.
    pub fn is_open(&self) -> bool {
        !matches!(self, EditSlot::Closed)
    }

    /// The entry being edited, if this is an edit form.
    pub fn target(&self) -> Option<EntryId> {
        match self {
            EditSlot::Edit(entry) => Some(entry.id),
            _ => None,
        }
    }

    /// Initial form contents: blank for a create, prefilled for an edit.
    pub fn initial_draft(&self) -> Option<EntryDraft> {
        match self {
            EditSlot::Closed => None,
            EditSlot::Create => Some(EntryDraft::new("", EntryKind::Book)),
            EditSlot::Edit(entry) => Some(EntryDraft::from_entry(entry)),
        }
    }
}

/// Page-level banner. Distinct from the form error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum PageError {
    #[error("Failed to load entries")]
    EntriesUnavailable,
    #[error("Failed to delete entry")]
    DeleteFailed,
}

/// Generic form message used when the server supplies none.
pub const SAVE_FAILED: &str = "Failed to save entry";

#[cfg(test)]
mod tests {
    use super::*;
    use readlist_core::EntryStatus;

    fn entry(id: i64) -> Entry {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": "Dune",
            "kind": "book",
            "status": "in_progress",
            "link": "https://example.com/dune",
            "created_at": "2024-03-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn closed_slot_is_not_open() {
        assert!(!EditSlot::Closed.is_open());
        assert!(EditSlot::Create.is_open());
        assert!(EditSlot::Edit(entry(1)).is_open());
    }

    #[test]
    fn edit_slot_prefills_from_entry() {
        let slot = EditSlot::Edit(entry(7));
        assert_eq!(slot.target(), Some(EntryId(7)));
        let draft = slot.initial_draft().unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.link.as_deref(), Some("https://example.com/dune"));
    }

    #[test]
    fn create_slot_starts_blank_to_read() {
        let draft = EditSlot::Create.initial_draft().unwrap();
        assert!(draft.title.is_empty());
        assert_eq!(draft.kind, EntryKind::Book);
        assert_eq!(draft.status, EntryStatus::ToRead);
        assert_eq!(EditSlot::Create.target(), None);
        assert!(EditSlot::Closed.initial_draft().is_none());
    }

    #[test]
    fn page_error_messages() {
        assert_eq!(PageError::EntriesUnavailable.to_string(), "Failed to load entries");
        assert_eq!(PageError::DeleteFailed.to_string(), "Failed to delete entry");
    }
}
