// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external collaborators of the follow-up workflow:
//! the tracking system, the pipeline generator, and the batch scheduler.

pub mod batch;
pub mod pipeline;
pub mod tracker;
pub mod traced;

pub use batch::{BatchAdapter, BatchError, CondorAdapter};
pub use pipeline::{BayesWavePipe, PipeInvocation, PipelineAdapter, PipelineError, ProcessOutput};
pub use tracker::{
    GraceDbTracker, NewEvent, Signoff, SignoffStatus, TrackerAdapter, TrackerError,
};
pub use traced::{TracedBatch, TracedPipeline, TracedTracker};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use batch::{BatchCall, FakeBatch, FakeOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use pipeline::FakePipeline;
#[cfg(any(test, feature = "test-support"))]
pub use tracker::{FakeTracker, TrackerCall};
