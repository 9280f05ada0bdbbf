// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The entry cache and its CRUD contract.
//!
//! The cache is a snapshot of the server's view and is never patched locally:
//! every successful write is followed by a refetch with the current filter.
//! Overlapping fetches are ordered by issue sequence, so the most recently
//! issued fetch wins regardless of completion order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use readlist_core::{
    Entry, EntryDraft, EntryId, EntryPatch, EntryService, EntryStatus, ReadlistError,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::confirm::{Confirm, DeleteOutcome};
use crate::fetch::fetch_all;
use crate::slot::{EditSlot, PageError, SAVE_FAILED};

/// Error shared between callers that joined the same fetch.
pub type SharedError = Arc<ReadlistError>;

type FetchResult = Result<Arc<Vec<Entry>>, SharedError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// What a refresh did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched collection replaced the cache.
    Applied { count: usize },
    /// A newer fetch was issued while this one ran; its result was dropped.
    Superseded,
}

/// Read-only view of the store for a rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub entries: Vec<Entry>,
    pub filter: Option<EntryStatus>,
    pub edit: EditSlot,
    pub loading: bool,
    pub page_error: Option<PageError>,
    pub form_error: Option<String>,
}

/// Which filter a fetch runs with.
#[derive(Debug, Clone, Copy)]
enum Target {
    /// The stored filter.
    Current,
    /// The given filter, leaving the stored one alone.
    Once(Option<EntryStatus>),
    /// The given filter, which also becomes the stored one.
    Set(Option<EntryStatus>),
}

struct InFlight {
    seq: u64,
    filter: Option<EntryStatus>,
    generation: u64,
    /// Callers currently awaiting this fetch. The record goes away with the
    /// last of them, whether it finished or was dropped.
    waiters: usize,
    fetch: SharedFetch,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    filter: Option<EntryStatus>,
    edit: EditSlot,
    page_error: Option<PageError>,
    form_error: Option<String>,
    /// Sequence number of the most recently issued fetch.
    issued: u64,
    /// Bumped after every successful write.
    generation: u64,
    in_flight: Vec<InFlight>,
}

impl State {
    fn release(&mut self, seq: u64) {
        if let Some(pos) = self.in_flight.iter().position(|f| f.seq == seq) {
            let record = &mut self.in_flight[pos];
            record.waiters = record.waiters.saturating_sub(1);
            if record.waiters == 0 {
                self.in_flight.remove(pos);
            }
        }
    }
}

/// One caller's claim on an in-flight fetch.
struct Waiter<'a> {
    store: &'a EntryStore,
    seq: u64,
    released: bool,
}

impl Waiter<'_> {
    fn release(&mut self, state: &mut State) {
        if !self.released {
            self.released = true;
            state.release(self.seq);
        }
    }
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        if !self.released {
            debug!(seq = self.seq, "entry fetch abandoned by caller");
            let store = self.store;
            let mut state = store.lock();
            self.release(&mut state);
        }
    }
}

/// Client-side entry collection bound to one [`EntryService`].
pub struct EntryStore {
    service: Arc<dyn EntryService>,
    page_size: u32,
    state: Mutex<State>,
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl EntryStore {
    /// Largest page the entry service accepts.
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    pub fn new(service: Arc<dyn EntryService>) -> Self {
        Self {
            service,
            page_size: Self::DEFAULT_PAGE_SIZE,
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, Self::DEFAULT_PAGE_SIZE);
        self
    }

    /// Refetches with the current filter.
    pub async fn refresh(&self) -> Result<RefreshOutcome, SharedError> {
        self.run(Target::Current).await
    }

    /// Fetches the collection constrained to `filter` and replaces the cache.
    ///
    /// The stored filter is not changed; use [`set_filter`](Self::set_filter)
    /// for that. On failure the cache is left as it was and the page error
    /// is raised.
    pub async fn refresh_with(
        &self,
        filter: Option<EntryStatus>,
    ) -> Result<RefreshOutcome, SharedError> {
        self.run(Target::Once(filter)).await
    }

    /// Sets the filter and immediately refetches with it.
    pub async fn set_filter(
        &self,
        filter: Option<EntryStatus>,
    ) -> Result<RefreshOutcome, SharedError> {
        self.run(Target::Set(filter)).await
    }

    /// Creates an entry, closes the form and refetches.
    ///
    /// An invalid draft is rejected before any request is sent. Failures
    /// land in the form error channel and leave the edit slot open.
    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, ReadlistError> {
        let draft = draft.normalized();
        if let Err(e) = draft.validate() {
            self.reject(&e);
            return Err(e);
        }

        match self.service.create_entry(&draft).await {
            Ok(entry) => {
                info!(id = %entry.id, "entry created");
                self.written(true).await;
                Ok(entry)
            }
            Err(e) => {
                self.reject(&e);
                Err(e)
            }
        }
    }

    /// Applies a partial update, closes the form and refetches.
    ///
    /// Every field the patch sets is validated first.
    pub async fn update(&self, id: EntryId, patch: EntryPatch) -> Result<Entry, ReadlistError> {
        let checked = if patch.is_empty() {
            Err(ReadlistError::Validation {
                field: "entry",
                message: "no fields to update".to_string(),
            })
        } else {
            patch.validate()
        };
        if let Err(e) = checked {
            self.reject(&e);
            return Err(e);
        }

        match self.service.update_entry(id, &patch).await {
            Ok(entry) => {
                info!(%id, "entry updated");
                self.written(true).await;
                Ok(entry)
            }
            Err(e) => {
                self.reject(&e);
                Err(e)
            }
        }
    }

    /// Submits the open form: a create for `Create`, a full update of the
    /// target for `Edit`.
    pub async fn submit(&self, draft: EntryDraft) -> Result<Entry, ReadlistError> {
        let slot = self.lock().edit.clone();
        match slot {
            EditSlot::Closed => Err(ReadlistError::Validation {
                field: "form",
                message: "no entry form is open".to_string(),
            }),
            EditSlot::Create => self.create(draft).await,
            EditSlot::Edit(entry) => self.update(entry.id, EntryPatch::from(draft)).await,
        }
    }

    /// Deletes an entry once `confirm` agrees, then refetches.
    ///
    /// A declined confirmation sends nothing.
    pub async fn delete(
        &self,
        id: EntryId,
        confirm: impl Confirm,
    ) -> Result<DeleteOutcome, ReadlistError> {
        if !confirm.confirm(id) {
            debug!(%id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        match self.service.delete_entry(id).await {
            Ok(()) => {
                info!(%id, "entry deleted");
                self.written(false).await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(%id, error = %e, "failed to delete entry");
                self.lock().page_error = Some(PageError::DeleteFailed);
                Err(e)
            }
        }
    }

    /// Fetches one entry without touching the cache.
    pub async fn get(&self, id: EntryId) -> Result<Entry, ReadlistError> {
        self.service.get_entry(id).await
    }

    pub async fn begin_create(&self) {
        let mut state = self.lock();
        state.edit = EditSlot::Create;
        state.form_error = None;
    }

    pub async fn begin_edit(&self, entry: Entry) {
        let mut state = self.lock();
        state.edit = EditSlot::Edit(entry);
        state.form_error = None;
    }

    pub async fn cancel_edit(&self) {
        let mut state = self.lock();
        state.edit = EditSlot::Closed;
        state.form_error = None;
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            entries: state.entries.clone(),
            filter: state.filter,
            edit: state.edit.clone(),
            loading: !state.in_flight.is_empty(),
            page_error: state.page_error,
            form_error: state.form_error.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, target: Target) -> Result<RefreshOutcome, SharedError> {
        let (mut waiter, fetch) = self.issue(target);
        let result = fetch.await;

        let mut state = self.lock();
        waiter.release(&mut state);
        let seq = waiter.seq;

        if seq != state.issued {
            debug!(seq, latest = state.issued, "discarding superseded entry fetch");
            return Ok(RefreshOutcome::Superseded);
        }

        match result {
            Ok(entries) => {
                state.entries = entries.as_ref().clone();
                state.page_error = None;
                Ok(RefreshOutcome::Applied {
                    count: state.entries.len(),
                })
            }
            Err(e) => {
                warn!(error = %e, "failed to load entries");
                state.page_error = Some(PageError::EntriesUnavailable);
                Err(e)
            }
        }
    }

    /// Resolves the target filter and returns the fetch to await for it,
    /// joining the latest in-flight fetch when it has the same filter and no
    /// write happened since it was issued. Storing a new filter and issuing
    /// its fetch happen under one lock.
    fn issue(&self, target: Target) -> (Waiter<'_>, SharedFetch) {
        let mut state = self.lock();
        let filter = match target {
            Target::Current => state.filter,
            Target::Once(filter) => filter,
            Target::Set(filter) => {
                state.filter = filter;
                filter
            }
        };

        let generation = state.generation;
        let latest_seq = state.issued;
        if let Some(latest) = state.in_flight.last_mut()
            && latest.seq == latest_seq
            && latest.filter == filter
            && latest.generation == generation
        {
            debug!(seq = latest.seq, "joining in-flight entry fetch");
            latest.waiters += 1;
            let waiter = Waiter {
                store: self,
                seq: latest.seq,
                released: false,
            };
            return (waiter, latest.fetch.clone());
        }

        state.issued += 1;
        let seq = state.issued;
        let service = Arc::clone(&self.service);
        let page_size = self.page_size;
        let fetch = async move {
            fetch_all(service.as_ref(), filter, page_size)
                .await
                .map(Arc::new)
                .map_err(Arc::new)
        }
        .boxed()
        .shared();

        state.in_flight.push(InFlight {
            seq,
            filter,
            generation,
            waiters: 1,
            fetch: fetch.clone(),
        });
        debug!(seq, filter = ?filter, "issuing entry fetch");
        let waiter = Waiter {
            store: self,
            seq,
            released: false,
        };
        (waiter, fetch)
    }

    /// Bookkeeping after a successful write, followed by the refetch.
    async fn written(&self, close_form: bool) {
        {
            let mut state = self.lock();
            state.generation += 1;
            if close_form {
                state.edit = EditSlot::Closed;
                state.form_error = None;
            }
        }
        // A failed refetch is already reported through the page error.
        if let Err(e) = self.refresh().await {
            debug!(error = %e, "refetch after write failed");
        }
    }

    fn reject(&self, error: &ReadlistError) {
        let message = form_message(error);
        debug!(error = %error, "entry form rejected");
        self.lock().form_error = Some(message);
    }
}

/// Text shown in the form error channel.
fn form_message(error: &ReadlistError) -> String {
    match error {
        ReadlistError::Validation { message, .. } => message.clone(),
        other => other
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| SAVE_FAILED.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readlist_test_utils::{Failure, MockEntryService, Operation};

    #[test]
    fn form_message_prefers_server_text() {
        let err = ReadlistError::Api {
            status: 422,
            message: Some("Title too long".into()),
        };
        assert_eq!(form_message(&err), "Title too long");
    }

    #[test]
    fn form_message_falls_back_to_generic() {
        let err = ReadlistError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(form_message(&err), SAVE_FAILED);
        let err = ReadlistError::Transport {
            message: "connection refused".into(),
            source: None,
        };
        assert_eq!(form_message(&err), SAVE_FAILED);
    }

    #[test]
    fn form_message_uses_validation_text() {
        let err = ReadlistError::Validation {
            field: "title",
            message: "title must not be empty".into(),
        };
        assert_eq!(form_message(&err), "title must not be empty");
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn failed_load_is_logged() {
        let service = MockEntryService::new();
        service.fail_next(Operation::List, Failure::status(502)).await;
        let store = EntryStore::new(Arc::new(service));
        let _ = store.refresh().await;
        assert!(logs_contain("failed to load entries"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn declined_delete_is_logged_and_sends_nothing() {
        let service = MockEntryService::new();
        let store = EntryStore::new(Arc::new(service.clone()));
        store.delete(EntryId(4), false).await.unwrap();
        assert!(logs_contain("delete declined"));
        assert_eq!(service.call_count().await, 0);
    }
}
