// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow phase state machine
//!
//! A run moves through a single pass with no loops:
//!
//! ```text
//! Pending -> Configured -> Launched -> Submitted -> Aborted | Failed
//!                                     Submitted -> Harvested -> Cleaned
//! ```
//!
//! Any non-terminal phase may also move to `Halted` when a step fails
//! outside the batch scheduler (bad attributes, generator error, missing
//! artifacts, tracker outage).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current phase of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Pending,
    Configured,
    Launched,
    Submitted,
    Aborted,
    Failed,
    Harvested,
    Cleaned,
    Halted,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Pending => "pending",
            Phase::Configured => "configured",
            Phase::Launched => "launched",
            Phase::Submitted => "submitted",
            Phase::Aborted => "aborted",
            Phase::Failed => "failed",
            Phase::Harvested => "harvested",
            Phase::Cleaned => "cleaned",
            Phase::Halted => "halted",
        }
    }

    /// Check if this phase is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Aborted | Phase::Failed | Phase::Cleaned | Phase::Halted
        )
    }

    /// Apply an event, returning the next phase
    pub fn transition(self, event: PhaseEvent) -> Result<Phase, TransitionError> {
        let next = match (self, event) {
            (Phase::Pending, PhaseEvent::Configured) => Phase::Configured,
            (Phase::Configured, PhaseEvent::Launched) => Phase::Launched,
            (Phase::Launched, PhaseEvent::Submitted) => Phase::Submitted,
            (Phase::Submitted, PhaseEvent::Aborted) => Phase::Aborted,
            (Phase::Submitted, PhaseEvent::Failed) => Phase::Failed,
            (Phase::Submitted, PhaseEvent::Harvested) => Phase::Harvested,
            (Phase::Harvested, PhaseEvent::Cleaned) => Phase::Cleaned,
            (from, PhaseEvent::Halt) if !from.is_terminal() => Phase::Halted,
            (from, event) => return Err(TransitionError { from, event }),
        };
        Ok(next)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// Events that move a run between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Configured,
    Launched,
    Submitted,
    Aborted,
    Failed,
    Harvested,
    Cleaned,
    Halt,
}

/// An event that is not valid in the current phase
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid transition from {from} on {event:?}")]
pub struct TransitionError {
    pub from: Phase,
    pub event: PhaseEvent,
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
