// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch submission bridge

use crate::report::{log_report_failure, Reporter};
use crate::WorkflowError;
use gwf_adapters::{BatchAdapter, TrackerAdapter};
use std::path::{Path, PathBuf};

/// Hands generated DAGs to the batch scheduler and reports bad outcomes
#[derive(Clone)]
pub struct SubmissionBridge<B, T> {
    batch: B,
    reporter: Reporter<T>,
}

impl<B, T> SubmissionBridge<B, T>
where
    B: BatchAdapter,
    T: TrackerAdapter,
{
    pub fn new(batch: B, reporter: Reporter<T>) -> Self {
        Self { batch, reporter }
    }

    /// Produce the submit description for a DAG
    pub async fn prepare(&self, dag: &Path) -> Result<PathBuf, WorkflowError> {
        Ok(self.batch.prepare(dag).await?)
    }

    /// Submit and wait for the job
    ///
    /// An aborted or failed job gets its own notice on the superevent; the
    /// returned error tells the caller not to harvest.
    pub async fn run(&self, submit_file: &Path, superevent_id: &str) -> Result<(), WorkflowError> {
        let err = match self.batch.submit(submit_file).await {
            Ok(()) => return Ok(()),
            Err(e) => WorkflowError::from(e),
        };

        match &err {
            WorkflowError::SubmissionAborted { .. } => {
                log_report_failure(self.reporter.aborted(superevent_id).await, "abort")
            }
            WorkflowError::SubmissionFailed { .. } => {
                log_report_failure(self.reporter.failed(superevent_id).await, "job failure")
            }
            _ => {}
        }
        Err(err)
    }
}
