// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`EntryService`] over HTTP.

use async_trait::async_trait;
use readlist_core::{
    Entry, EntryDraft, EntryId, EntryPage, EntryPatch, EntryQuery, EntryService, ReadlistError,
};
use reqwest::Method;

use crate::client::ApiClient;

#[async_trait]
impl EntryService for ApiClient {
    async fn list_entries(&self, query: &EntryQuery) -> Result<EntryPage, ReadlistError> {
        let mut url = self.endpoint("entries")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(status) = query.status {
                pairs.append_pair("status", &status.to_string());
            }
            pairs
                .append_pair("limit", &query.limit.to_string())
                .append_pair("offset", &query.offset.to_string());
        }
        self.execute(self.authorized(Method::GET, url)?).await
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, ReadlistError> {
        let url = self.endpoint(&format!("entries/{id}"))?;
        self.execute(self.authorized(Method::GET, url)?).await
    }

    async fn create_entry(&self, draft: &EntryDraft) -> Result<Entry, ReadlistError> {
        let url = self.endpoint("entries")?;
        self.execute(self.authorized(Method::POST, url)?.json(draft))
            .await
    }

    async fn update_entry(&self, id: EntryId, patch: &EntryPatch) -> Result<Entry, ReadlistError> {
        let url = self.endpoint(&format!("entries/{id}"))?;
        self.execute(self.authorized(Method::PATCH, url)?.json(patch))
            .await
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), ReadlistError> {
        let url = self.endpoint(&format!("entries/{id}"))?;
        self.execute_empty(self.authorized(Method::DELETE, url)?)
            .await
    }
}
