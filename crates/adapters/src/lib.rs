// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external collaborators: lock queue storage and API tokens

pub mod store;
pub mod token;
pub mod traced;

pub use store::{JsonFileLockStore, LockStore, MemoryLockStore, StoreError};
pub use token::{
    JsonFileTokenAuthorizer, MemoryTokenAuthorizer, SequentialTokenGen, TokenAuthorizer,
    TokenError, TokenGen, UuidTokenGen,
};
pub use traced::TracedLockStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use store::{FakeLockStore, StoreCall};
#[cfg(any(test, feature = "test-support"))]
pub use token::{FakeTokenAuthorizer, TokenCall};
