// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry CRUD endpoints of the remote service.

use async_trait::async_trait;

use crate::error::ReadlistError;
use crate::types::{Entry, EntryDraft, EntryId, EntryPage, EntryPatch, EntryQuery};

/// Remote entry collection.
///
/// The server owns every entry; callers treat returned values as snapshots.
#[async_trait]
pub trait EntryService: Send + Sync {
    /// Fetches one page of entries, optionally constrained to a status.
    async fn list_entries(&self, query: &EntryQuery) -> Result<EntryPage, ReadlistError>;

    /// Fetches a single entry.
    async fn get_entry(&self, id: EntryId) -> Result<Entry, ReadlistError>;

    /// Creates an entry and returns it with its server-assigned fields.
    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, ReadlistError>;

    /// Applies a partial update.
    async fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> Result<Entry, ReadlistError>;

    /// Deletes an entry.
    async fn delete_entry(&self, id: EntryId) -> Result<(), ReadlistError>;
}
