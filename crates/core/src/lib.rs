// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gwf-core: domain types for gravitational-wave follow-up orchestration
//!
//! This crate provides:
//! - Event attributes and the canonical instrument table
//! - A wall clock with GPS time conversion
//! - The per-run phase state machine
//! - Upload records sent to the tracking system
//! - Typed result summaries and their markup rendering
//! - Settings shared by every workflow component

pub mod clock;
pub mod event;
pub mod id;
pub mod phase;
pub mod settings;
pub mod summary;
pub mod template;
pub mod upload;

pub use clock::{gps_time, Clock, FakeClock, SystemClock};
pub use event::{AttributeError, EventAttributes, Instrument};
pub use id::{IdGen, RunId, SequentialIdGen, UuidIdGen};
pub use phase::{Phase, PhaseEvent, TransitionError};
pub use settings::{
    BatchSettings, CleanupSettings, HarvestSettings, MockBurstSettings, PipelineSettings,
    Settings, SettingsError, TrackerSettings,
};
pub use summary::{BayesFactors, Estimate, Evidence, InstrumentSummary};
pub use template::{Context, ContextValue, TemplateEngine, TemplateError};
pub use upload::{Tag, Upload};
