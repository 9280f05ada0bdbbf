// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the readlist client.
//!
//! This crate provides the error type, the domain types (entries, drafts,
//! credentials) and the service traits that the HTTP client implements and
//! the session gate and entry store consume.

pub mod error;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export key items at crate root for ergonomic imports.
pub use error::ReadlistError;
pub use types::{
    Credential, Entry, EntryDraft, EntryId, EntryKind, EntryPage, EntryPatch, EntryQuery,
    EntryStatus, LoginRequest, RegisterRequest, UserProfile,
};

pub use traits::{AuthService, CredentialStore, EntryService};
