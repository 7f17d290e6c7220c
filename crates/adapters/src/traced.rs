// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::batch::{BatchAdapter, BatchError};
use crate::pipeline::{PipeInvocation, PipelineAdapter, PipelineError, ProcessOutput};
use crate::tracker::{NewEvent, Signoff, TrackerAdapter, TrackerError};
use async_trait::async_trait;
use gwf_core::Upload;
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// Wrapper that adds tracing to any TrackerAdapter
#[derive(Clone)]
pub struct TracedTracker<T> {
    inner: T,
}

impl<T> TracedTracker<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<T: TrackerAdapter> TrackerAdapter for TracedTracker<T> {
    async fn get_event(&self, graceid: &str) -> Result<serde_json::Value, TrackerError> {
        let span = tracing::info_span!("tracker.get_event", graceid);
        async {
            let start = std::time::Instant::now();
            let result = self.inner.get_event(graceid).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::debug!(elapsed_ms, "fetched"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "fetch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn upload(&self, upload: &Upload) -> Result<(), TrackerError> {
        let span = tracing::info_span!("tracker.upload", target_id = %upload.target_id);
        async {
            tracing::info!(
                comment = %upload.message,
                file = upload.filename.as_deref().unwrap_or("-"),
                tags = ?upload.tag_names(),
                "uploading"
            );

            // Precondition: uploads must name a target
            if upload.target_id.trim().is_empty() {
                tracing::error!("upload has no target id");
                return Err(TrackerError::InvalidRequest(
                    "upload has no target id".to_string(),
                ));
            }

            let start = std::time::Instant::now();
            let result = self.inner.upload(upload).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "uploaded"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "upload failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_superevents(&self, query: &str) -> Result<Vec<serde_json::Value>, TrackerError> {
        let span = tracing::info_span!("tracker.get_superevents", query);
        async {
            let result = self.inner.get_superevents(query).await;
            match &result {
                Ok(found) => tracing::debug!(count = found.len(), "queried"),
                Err(e) => tracing::error!(error = %e, "query failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn create_event(&self, event: &NewEvent) -> Result<String, TrackerError> {
        let span = tracing::info_span!(
            "tracker.create_event",
            pipeline = %event.pipeline,
            group = %event.group
        );
        async {
            tracing::debug!(payload_len = event.filecontents.len(), "creating");
            let result = self.inner.create_event(event).await;
            match &result {
                Ok(graceid) => tracing::info!(graceid = %graceid, "event created"),
                Err(e) => tracing::error!(error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn create_signoff(&self, signoff: &Signoff) -> Result<(), TrackerError> {
        let span = tracing::info_span!(
            "tracker.create_signoff",
            superevent_id = %signoff.superevent_id,
            status = signoff.status.as_str()
        );
        async {
            let result = self.inner.create_signoff(signoff).await;
            match &result {
                Ok(()) => tracing::info!("signed off"),
                Err(e) => tracing::error!(error = %e, "signoff failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any PipelineAdapter
#[derive(Clone)]
pub struct TracedPipeline<P> {
    inner: P,
}

impl<P> TracedPipeline<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PipelineAdapter> PipelineAdapter for TracedPipeline<P> {
    async fn generate(&self, invocation: &PipeInvocation) -> Result<ProcessOutput, PipelineError> {
        let span = tracing::info_span!(
            "pipeline.generate",
            event_id = %invocation.event_id,
            work_dir = %invocation.work_dir.display()
        );
        async {
            tracing::info!(config = %invocation.config.display(), "starting");

            // Precondition: the rendered config must exist
            if !invocation.config.exists() {
                tracing::error!("config file does not exist");
                return Err(PipelineError::MissingConfig(invocation.config.clone()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.generate(invocation).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(out) if out.success() => tracing::info!(elapsed_ms, "generator finished"),
                Ok(out) => tracing::error!(
                    elapsed_ms,
                    code = ?out.code,
                    stderr_len = out.stderr.len(),
                    "generator exited with failure"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "generator did not start"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any BatchAdapter
#[derive(Clone)]
pub struct TracedBatch<B> {
    inner: B,
}

impl<B> TracedBatch<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: BatchAdapter> BatchAdapter for TracedBatch<B> {
    async fn prepare(&self, dag: &Path) -> Result<PathBuf, BatchError> {
        let span = tracing::info_span!("batch.prepare", dag = %dag.display());
        async {
            // Precondition: the DAG must have been generated
            if !dag.exists() {
                tracing::error!("dag file does not exist");
                return Err(BatchError::MissingInput(dag.to_path_buf()));
            }

            let result = self.inner.prepare(dag).await;
            match &result {
                Ok(sub) => tracing::info!(submit_file = %sub.display(), "prepared"),
                Err(e) => tracing::error!(error = %e, "prepare failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn submit(&self, submit_file: &Path) -> Result<(), BatchError> {
        let span = tracing::info_span!("batch.submit", submit_file = %submit_file.display());
        async {
            tracing::info!("submitting");

            // Precondition: the submit description must exist
            if !submit_file.exists() {
                tracing::error!("submit file does not exist");
                return Err(BatchError::MissingInput(submit_file.to_path_buf()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.submit(submit_file).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "job completed"),
                Err(BatchError::Aborted { cluster }) => {
                    tracing::warn!(elapsed_ms, cluster, "job aborted")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "job failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
