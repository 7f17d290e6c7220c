// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable run journal and the state replayed from it

mod journal;
mod state;

pub use journal::{Journal, JournalError, Operation};
pub use state::{MaterializedState, RunRecord};
