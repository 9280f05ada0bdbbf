// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full-collection fetch over the paginated list endpoint.

use readlist_core::{Entry, EntryQuery, EntryService, EntryStatus, ReadlistError};
use tracing::debug;

/// Walks `limit`/`offset` pages until the reported total is reached or a
/// short page arrives. Any page failure fails the whole fetch, so a caller
/// never sees a partial collection.
pub async fn fetch_all(
    service: &dyn EntryService,
    status: Option<EntryStatus>,
    page_size: u32,
) -> Result<Vec<Entry>, ReadlistError> {
    let mut query = EntryQuery::first_page(status, page_size.max(1));
    let mut items = Vec::new();

    loop {
        let page = service.list_entries(&query).await?;
        let received = page.items.len();
        items.extend(page.items);
        debug!(
            offset = query.offset,
            received,
            total = page.total,
            "entry page received"
        );

        if received == 0 || received < query.limit as usize || items.len() as u64 >= page.total {
            break;
        }
        query.offset = query.offset.saturating_add(received as u32);
    }

    Ok(items)
}
