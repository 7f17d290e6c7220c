// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized run state from journal replay

use crate::journal::Operation;
use chrono::{DateTime, Utc};
use gwf_core::{Phase, RunId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Latest known state of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub run_id: RunId,
    pub event_id: String,
    pub superevent_id: String,
    pub phase: Phase,
    pub reason: Option<String>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for RunRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<38} {:<12} {:<12} {:<11} {}",
            self.run_id,
            self.event_id,
            self.superevent_id,
            self.phase,
            self.updated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        if let Some(reason) = &self.reason {
            write!(f, "  ({})", reason)?;
        }
        Ok(())
    }
}

/// Materialized state built from journal operations
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub runs: BTreeMap<RunId, RunRecord>,
}

impl MaterializedState {
    /// Replay operations into a fresh state
    pub fn from_operations<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> Self {
        let mut state = Self::default();
        for op in ops {
            state.apply(op);
        }
        state
    }

    /// Get a run by id or unique prefix
    pub fn get_run(&self, id: &str) -> Option<&RunRecord> {
        if let Some(run) = self.runs.get(&RunId::from(id)) {
            return Some(run);
        }

        let matches: Vec<_> = self
            .runs
            .iter()
            .filter(|(k, _)| k.0.starts_with(id))
            .collect();

        if matches.len() == 1 {
            Some(matches[0].1)
        } else {
            None
        }
    }

    /// Runs for an event, oldest first
    pub fn runs_for_event(&self, event_id: &str) -> Vec<&RunRecord> {
        let mut runs: Vec<_> = self
            .runs
            .values()
            .filter(|r| r.event_id == event_id)
            .collect();
        runs.sort_by_key(|r| r.started_at);
        runs
    }

    /// Apply an operation to update the state
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::RunStarted {
                run_id,
                event_id,
                superevent_id,
                at,
            } => {
                self.runs.insert(
                    run_id.clone(),
                    RunRecord {
                        run_id: run_id.clone(),
                        event_id: event_id.clone(),
                        superevent_id: superevent_id.clone(),
                        phase: Phase::Pending,
                        reason: None,
                        started_at: *at,
                        updated_at: *at,
                    },
                );
            }

            Operation::PhaseChanged {
                run_id,
                phase,
                reason,
                at,
            } => {
                if let Some(run) = self.runs.get_mut(run_id) {
                    run.phase = *phase;
                    run.reason = reason.clone();
                    run.updated_at = *at;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
