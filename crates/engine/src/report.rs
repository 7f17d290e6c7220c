// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status reporter
//!
//! One call per workflow transition, each a single upload to the tracking
//! system. Progress and failure notices go to the superevent; analysis
//! products go to the preferred event.

use crate::WorkflowError;
use gwf_adapters::{ProcessOutput, TrackerAdapter};
use gwf_core::{Tag, Upload};

pub const GENERATION_FAILED: &str = "Failed to prepare DAG";
pub const GENERATION_LOG: &str = "pe_dag.log";
pub const JOB_ABORTED: &str = "BayesWave job was aborted.";
pub const JOB_FAILED: &str = "BayesWave job failed.";
pub const SKYMAP_MESSAGE: &str = "BayesWave sky localization";
pub const ANALYSIS_FINISHED: &str = "BayesWave analysis finished.";

/// Uploads workflow status messages
#[derive(Clone)]
pub struct Reporter<T> {
    tracker: T,
}

impl<T: TrackerAdapter> Reporter<T> {
    pub fn new(tracker: T) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Send one upload
    pub async fn send(&self, upload: Upload) -> Result<(), WorkflowError> {
        self.tracker.upload(&upload).await?;
        Ok(())
    }

    pub async fn launched(&self, superevent_id: &str, event_id: &str) -> Result<(), WorkflowError> {
        self.send(
            Upload::message(superevent_id, format!("BayesWave launched for {}.", event_id))
                .with_tag(Tag::Pe),
        )
        .await
    }

    /// Upload the generator's arguments and output as a diagnostic log
    pub async fn generation_failed(
        &self,
        superevent_id: &str,
        output: &ProcessOutput,
    ) -> Result<(), WorkflowError> {
        let payload = serde_json::to_vec(output)
            .map_err(|e| WorkflowError::Configuration(format!("unserializable output: {}", e)))?;
        self.send(
            Upload::file(superevent_id, GENERATION_LOG, payload, GENERATION_FAILED)
                .with_tag(Tag::Pe),
        )
        .await
    }

    pub async fn aborted(&self, superevent_id: &str) -> Result<(), WorkflowError> {
        self.send(Upload::message(superevent_id, JOB_ABORTED).with_tag(Tag::Pe))
            .await
    }

    pub async fn failed(&self, superevent_id: &str) -> Result<(), WorkflowError> {
        self.send(Upload::message(superevent_id, JOB_FAILED).with_tag(Tag::Pe))
            .await
    }

    pub async fn skymap(
        &self,
        event_id: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> Result<(), WorkflowError> {
        self.send(
            Upload::file(event_id, filename, content, SKYMAP_MESSAGE)
                .with_tag(Tag::SkyLoc)
                .with_tag(Tag::Pe),
        )
        .await
    }

    pub async fn report_link(&self, event_id: &str, url: &str) -> Result<(), WorkflowError> {
        self.send(
            Upload::message(
                event_id,
                format!("BayesWave <a href=\"{}\">full report</a>", url),
            )
            .with_tag(Tag::Pe),
        )
        .await
    }

    /// Upload a rendered summary table
    pub async fn table(&self, event_id: &str, markup: &str) -> Result<(), WorkflowError> {
        self.send(Upload::message(event_id, markup).with_tag(Tag::Pe))
            .await
    }

    pub async fn finished(&self, superevent_id: &str) -> Result<(), WorkflowError> {
        self.send(Upload::message(superevent_id, ANALYSIS_FINISHED).with_tag(Tag::Pe))
            .await
    }

    /// Notice for failures no stage reported on its own
    pub async fn halted(&self, superevent_id: &str, err: &WorkflowError) -> Result<(), WorkflowError> {
        self.send(
            Upload::message(superevent_id, format!("BayesWave follow-up halted: {}", err))
                .with_tag(Tag::Pe),
        )
        .await
    }
}

/// Log a failed status upload without masking the error being reported
pub(crate) fn log_report_failure(result: Result<(), WorkflowError>, what: &str) {
    if let Err(e) = result {
        tracing::error!(error = %e, "failed to report {}", what);
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
