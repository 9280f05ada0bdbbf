// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keeps bearer tokens, JWTs and passwords out of logs and terminal output.

pub mod redact;

pub use redact::{REDACTED, mask_secret, redact};
