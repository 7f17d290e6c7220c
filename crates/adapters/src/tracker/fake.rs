// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake tracking-system adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NewEvent, Signoff, TrackerAdapter, TrackerError};
use async_trait::async_trait;
use gwf_core::Upload;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded tracker call
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCall {
    GetEvent { graceid: String },
    Upload(Upload),
    GetSuperevents { query: String },
    CreateEvent(NewEvent),
    CreateSignoff(Signoff),
}

#[derive(Default)]
struct FakeTrackerState {
    events: HashMap<String, serde_json::Value>,
    superevents: Vec<serde_json::Value>,
    calls: Vec<TrackerCall>,
    failing_uploads: Option<String>,
    next_event: u64,
}

/// In-memory tracker that records every call
#[derive(Clone, Default)]
pub struct FakeTracker {
    inner: Arc<Mutex<FakeTrackerState>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event returned by `get_event`
    pub fn add_event(&self, graceid: &str, attributes: serde_json::Value) {
        self.lock().events.insert(graceid.to_string(), attributes);
    }

    /// Set the result of every `get_superevents` query
    pub fn set_superevents(&self, superevents: Vec<serde_json::Value>) {
        self.lock().superevents = superevents;
    }

    /// Make uploads whose message contains `needle` fail
    pub fn fail_uploads_containing(&self, needle: &str) {
        self.lock().failing_uploads = Some(needle.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.lock().calls.clone()
    }

    /// Get recorded uploads, in order
    pub fn uploads(&self) -> Vec<Upload> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                TrackerCall::Upload(u) => Some(u.clone()),
                _ => None,
            })
            .collect()
    }

    /// Messages of recorded uploads, in order
    pub fn messages(&self) -> Vec<String> {
        self.uploads().into_iter().map(|u| u.message).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeTrackerState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TrackerAdapter for FakeTracker {
    async fn get_event(&self, graceid: &str) -> Result<serde_json::Value, TrackerError> {
        let mut state = self.lock();
        state.calls.push(TrackerCall::GetEvent {
            graceid: graceid.to_string(),
        });
        state
            .events
            .get(graceid)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(graceid.to_string()))
    }

    async fn upload(&self, upload: &Upload) -> Result<(), TrackerError> {
        let mut state = self.lock();
        state.calls.push(TrackerCall::Upload(upload.clone()));
        match &state.failing_uploads {
            Some(needle) if upload.message.contains(needle.as_str()) => {
                Err(TrackerError::Transport("injected upload failure".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn get_superevents(&self, query: &str) -> Result<Vec<serde_json::Value>, TrackerError> {
        let mut state = self.lock();
        state.calls.push(TrackerCall::GetSuperevents {
            query: query.to_string(),
        });
        Ok(state.superevents.clone())
    }

    async fn create_event(&self, event: &NewEvent) -> Result<String, TrackerError> {
        let mut state = self.lock();
        state.calls.push(TrackerCall::CreateEvent(event.clone()));
        state.next_event += 1;
        Ok(format!("M{}", state.next_event))
    }

    async fn create_signoff(&self, signoff: &Signoff) -> Result<(), TrackerError> {
        self.lock()
            .calls
            .push(TrackerCall::CreateSignoff(signoff.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
