// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory entry service for deterministic testing.
//!
//! `MockEntryService` emulates the server's filtering, ordering and
//! pagination, records every call, and lets a test inject failures or delays
//! per operation.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use readlist_core::{
    Entry, EntryDraft, EntryId, EntryPage, EntryPatch, EntryQuery, EntryService, EntryStatus,
    ReadlistError,
};

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    List(EntryQuery),
    Get(EntryId),
    Create(EntryDraft),
    Update(EntryId, EntryPatch),
    Delete(EntryId),
}

impl ServiceCall {
    pub fn operation(&self) -> Operation {
        match self {
            ServiceCall::List(_) => Operation::List,
            ServiceCall::Get(_) => Operation::Get,
            ServiceCall::Create(_) => Operation::Create,
            ServiceCall::Update(..) => Operation::Update,
            ServiceCall::Delete(_) => Operation::Delete,
        }
    }
}

/// Operation selector for failure and delay injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A failure to return from the next matching call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Non-success response, optionally with an `error.message`.
    Api { status: u16, message: Option<String> },
    /// No response at all.
    Transport,
}

impl Failure {
    pub fn status(status: u16) -> Self {
        Failure::Api {
            status,
            message: None,
        }
    }

    pub fn with_message(status: u16, message: impl Into<String>) -> Self {
        Failure::Api {
            status,
            message: Some(message.into()),
        }
    }

    fn into_error(self) -> ReadlistError {
        match self {
            Failure::Api { status, message } => ReadlistError::Api { status, message },
            Failure::Transport => ReadlistError::Transport {
                message: "connection refused".to_string(),
                source: None,
            },
        }
    }
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    next_id: i64,
    calls: Vec<ServiceCall>,
    failures: HashMap<Operation, VecDeque<Failure>>,
    page_failures: HashMap<u32, Failure>,
    list_delays: HashMap<Option<EntryStatus>, Duration>,
    delays: HashMap<Operation, Duration>,
}

/// A mock entry service backed by a vector.
#[derive(Clone, Default)]
pub struct MockEntryService {
    inner: Arc<Mutex<Inner>>,
}

impl MockEntryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry as if the server had created it, without recording a call.
    pub async fn seed(&self, draft: EntryDraft) -> Entry {
        let mut inner = self.inner.lock().await;
        insert(&mut inner, draft.normalized())
    }

    /// Seeds several entries in order.
    pub async fn seed_all(&self, drafts: impl IntoIterator<Item = EntryDraft>) -> Vec<Entry> {
        let mut seeded = Vec::new();
        for draft in drafts {
            seeded.push(self.seed(draft).await);
        }
        seeded
    }

    /// Current server-side entries, newest first.
    pub async fn entries(&self) -> Vec<Entry> {
        let inner = self.inner.lock().await;
        ordered(&inner.entries, None)
    }

    pub async fn calls(&self) -> Vec<ServiceCall> {
        self.inner.lock().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.inner.lock().await.calls.len()
    }

    pub async fn count_of(&self, operation: Operation) -> usize {
        self.inner
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    pub async fn clear_calls(&self) {
        self.inner.lock().await.calls.clear();
    }

    /// Makes the next call of `operation` fail. Failures queue up in order.
    pub async fn fail_next(&self, operation: Operation, failure: Failure) {
        self.inner
            .lock()
            .await
            .failures
            .entry(operation)
            .or_default()
            .push_back(failure);
    }

    /// Makes the next list call at `offset` fail, leaving earlier pages intact.
    pub async fn fail_list_page(&self, offset: u32, failure: Failure) {
        self.inner
            .lock()
            .await
            .page_failures
            .insert(offset, failure);
    }

    /// Delays every call of `operation`.
    pub async fn delay(&self, operation: Operation, duration: Duration) {
        self.inner.lock().await.delays.insert(operation, duration);
    }

    /// Delays list calls for one filter value only.
    pub async fn delay_list(&self, status: Option<EntryStatus>, duration: Duration) {
        self.inner
            .lock()
            .await
            .list_delays
            .insert(status, duration);
    }

    /// Records the call and returns the injected delay and failure, if any.
    async fn begin(&self, call: ServiceCall) -> Result<(), ReadlistError> {
        let (delay, failure) = {
            let mut inner = self.inner.lock().await;
            let operation = call.operation();
            let delay = match &call {
                ServiceCall::List(query) => inner.list_delays.get(&query.status).copied(),
                _ => None,
            }
            .or_else(|| inner.delays.get(&operation).copied());
            let page_failure = match &call {
                ServiceCall::List(query) => inner.page_failures.remove(&query.offset),
                _ => None,
            };
            let failure = page_failure.or_else(|| {
                inner
                    .failures
                    .get_mut(&operation)
                    .and_then(VecDeque::pop_front)
            });
            inner.calls.push(call);
            (delay, failure)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EntryService for MockEntryService {
    async fn list_entries(&self, query: &EntryQuery) -> Result<EntryPage, ReadlistError> {
        self.begin(ServiceCall::List(*query)).await?;
        let inner = self.inner.lock().await;
        let matching = ordered(&inner.entries, query.status);
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok(EntryPage {
            items,
            total,
            limit: query.limit,
            offset: query.offset,
        })
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, ReadlistError> {
        self.begin(ServiceCall::Get(id)).await?;
        let inner = self.inner.lock().await;
        inner
            .entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, ReadlistError> {
        self.begin(ServiceCall::Create(draft.clone())).await?;
        let mut inner = self.inner.lock().await;
        Ok(insert(&mut inner, draft.clone()))
    }

    async fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> Result<Entry, ReadlistError> {
        self.begin(ServiceCall::Update(id, patch.clone())).await?;
        let mut inner = self.inner.lock().await;
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(not_found)?;
        patch.apply_to(entry);
        entry.updated_at = Some(Utc::now());
        Ok(entry.clone())
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), ReadlistError> {
        self.begin(ServiceCall::Delete(id)).await?;
        let mut inner = self.inner.lock().await;
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        if inner.entries.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

fn insert(inner: &mut Inner, draft: EntryDraft) -> Entry {
    inner.next_id += 1;
    let now = Utc::now();
    let entry = Entry {
        id: EntryId(inner.next_id),
        title: draft.title,
        kind: draft.kind,
        status: draft.status,
        link: draft.link,
        description: draft.description,
        created_at: now,
        updated_at: Some(now),
    };
    inner.entries.push(entry.clone());
    entry
}

/// Newest first, as the server orders by creation time descending.
fn ordered(entries: &[Entry], status: Option<EntryStatus>) -> Vec<Entry> {
    let mut matching: Vec<Entry> = entries
        .iter()
        .filter(|e| status.is_none_or(|s| e.status == s))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.id.0.cmp(&a.id.0));
    matching
}

fn not_found() -> ReadlistError {
    ReadlistError::Api {
        status: 404,
        message: Some("Entry not found".to_string()),
    }
}
