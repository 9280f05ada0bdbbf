// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry state for the readlist dashboard.
//!
//! [`EntryStore`] owns the cached entry list, the active status filter, the
//! pending-edit slot and the page and form error channels. It talks to the
//! server only through [`EntryService`](readlist_core::EntryService) and never
//! authenticates on its own.

pub mod confirm;
pub mod fetch;
pub mod slot;
pub mod store;

pub use confirm::{Confirm, DeleteOutcome};
pub use fetch::fetch_all;
pub use slot::{EditSlot, PageError, SAVE_FAILED};
pub use store::{EntryStore, RefreshOutcome, SharedError, StoreSnapshot};
