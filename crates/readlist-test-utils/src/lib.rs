// SPDX-FileCopyrightText: 2026 Readlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for readlist integration tests.
//!
//! Provides mock entry and auth services and a [`TestHarness`] that wires a
//! session gate and an entry store to them.

pub mod harness;
pub mod mock_auth;
pub mod mock_service;

pub use harness::{TEST_PASSWORD, TEST_USERNAME, TestHarness, TestHarnessBuilder};
pub use mock_auth::MockAuthService;
pub use mock_service::{Failure, MockEntryService, Operation, ServiceCall};
