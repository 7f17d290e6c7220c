// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch scheduler adapters

mod condor;

pub use condor::CondorAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BatchCall, FakeBatch, FakeOutcome};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the batch scheduler
///
/// `Aborted` and `Failed` are terminal outcomes of a submitted job;
/// `CommandFailed` means the scheduler tooling itself misbehaved.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch job {cluster} was aborted")]
    Aborted { cluster: u64 },
    #[error("batch job {cluster} failed (exit code {exit_code:?})")]
    Failed {
        cluster: u64,
        exit_code: Option<i32>,
    },
    #[error("{program} failed: {message}")]
    CommandFailed { program: String, message: String },
    #[error("input file does not exist: {}", .0.display())]
    MissingInput(PathBuf),
}

/// Path of the submit description produced for a DAG file
pub fn submit_file_for(dag: &Path) -> PathBuf {
    let mut name = dag.as_os_str().to_os_string();
    name.push(".condor.sub");
    PathBuf::from(name)
}

/// Adapter for the batch scheduler
#[async_trait]
pub trait BatchAdapter: Clone + Send + Sync + 'static {
    /// Produce the submit description for a DAG without running it
    async fn prepare(&self, dag: &Path) -> Result<PathBuf, BatchError>;

    /// Submit a prepared description and wait for the job to finish
    async fn submit(&self, submit_file: &Path) -> Result<(), BatchError>;
}
