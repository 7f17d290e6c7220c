// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking-system (event database) adapters

mod gracedb;

pub use gracedb::GraceDbTracker;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTracker, TrackerCall};

use async_trait::async_trait;
use gwf_core::Upload;
use thiserror::Error;

/// Errors from tracking-system operations
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A new event to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Pipeline-specific event file
    pub filecontents: Vec<u8>,
    pub search: String,
    pub pipeline: String,
    pub group: String,
}

/// Outcome of a human (or simulated) vetting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignoffStatus {
    Ok,
    No,
}

impl SignoffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignoffStatus::Ok => "OK",
            SignoffStatus::No => "NO",
        }
    }
}

/// A signoff on a superevent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signoff {
    pub status: SignoffStatus,
    pub comment: String,
    /// Signoff type, e.g. `ADV` for advocate signoffs
    pub signoff_type: String,
    pub superevent_id: String,
}

/// Adapter for the shared event database
///
/// The service is treated as stateless and safe to call concurrently.
#[async_trait]
pub trait TrackerAdapter: Clone + Send + Sync + 'static {
    /// Fetch the attributes of an event
    async fn get_event(&self, graceid: &str) -> Result<serde_json::Value, TrackerError>;

    /// Append a log message (optionally with a file) to an event or superevent
    async fn upload(&self, upload: &Upload) -> Result<(), TrackerError>;

    /// Query superevents
    async fn get_superevents(&self, query: &str) -> Result<Vec<serde_json::Value>, TrackerError>;

    /// Create a new event, returning its id
    async fn create_event(&self, event: &NewEvent) -> Result<String, TrackerError>;

    /// Record a signoff on a superevent
    async fn create_signoff(&self, signoff: &Signoff) -> Result<(), TrackerError>;
}
