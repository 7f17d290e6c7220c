// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the follow-up workflow

use gwf_adapters::{BatchError, PipelineError, TrackerError};
use gwf_core::{AttributeError, TemplateError, TransitionError};
use gwf_storage::JournalError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a workflow run
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("pipeline generation failed (exit code {code:?})")]
    PipelineGeneration {
        args: Vec<String>,
        stdout: String,
        stderr: String,
        code: Option<i32>,
    },
    #[error("batch job {cluster} was aborted")]
    SubmissionAborted { cluster: u64 },
    #[error("batch job {cluster} failed (exit code {exit_code:?})")]
    SubmissionFailed {
        cluster: u64,
        exit_code: Option<i32>,
    },
    #[error("missing artifact: {what} ({})", .path.display())]
    MissingArtifact { what: String, path: PathBuf },
    #[error("a run for {event_id} is already in progress")]
    AlreadyRunning { event_id: String },
    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("batch error: {0}")]
    Batch(BatchError),
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
    #[error("invalid transition: {0}")]
    Transition(#[from] TransitionError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkflowError {
    pub(crate) fn missing(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        WorkflowError::MissingArtifact {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Whether the failure was already reported to the tracking system
    /// by the stage that raised it
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            WorkflowError::PipelineGeneration { .. }
                | WorkflowError::SubmissionAborted { .. }
                | WorkflowError::SubmissionFailed { .. }
        )
    }
}

impl From<BatchError> for WorkflowError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Aborted { cluster } => WorkflowError::SubmissionAborted { cluster },
            BatchError::Failed { cluster, exit_code } => {
                WorkflowError::SubmissionFailed { cluster, exit_code }
            }
            other => WorkflowError::Batch(other),
        }
    }
}

impl From<AttributeError> for WorkflowError {
    fn from(err: AttributeError) -> Self {
        WorkflowError::Configuration(err.to_string())
    }
}

impl From<TemplateError> for WorkflowError {
    fn from(err: TemplateError) -> Self {
        WorkflowError::Configuration(err.to_string())
    }
}
