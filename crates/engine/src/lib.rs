// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gwf-engine: the BayesWave follow-up workflow
//!
//! Components run in a fixed order, each handed its predecessor's result:
//! config rendering, pipeline launch, batch submission, result harvest,
//! status reporting and work directory cleanup. [`Workflow`] chains them
//! under a per-event lock and journals every phase change.

mod cleanup;
mod error;
pub mod harvest;
mod launch;
mod lock;
pub mod mock_bursts;
mod render;
pub mod report;
mod submit;
mod workflow;

pub use cleanup::Cleanup;
pub use error::WorkflowError;
pub use harvest::{HarvestReport, Harvester};
pub use launch::JobLauncher;
pub use lock::EventLock;
pub use mock_bursts::{InjectionPlan, MockBursts, MockEvent};
pub use render::{fetch_event, ConfigRenderer, DEFAULT_TEMPLATE};
pub use report::Reporter;
pub use submit::SubmissionBridge;
pub use workflow::{RunSummary, Workflow, WorkflowDeps};
