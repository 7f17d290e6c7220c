// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job launcher
//!
//! Runs the workflow generator to turn a rendered config into a DAG. The
//! generator only describes the job; submission is left to the batch bridge.

use crate::report::{log_report_failure, Reporter};
use crate::WorkflowError;
use gwf_adapters::{PipeInvocation, PipelineAdapter, TrackerAdapter};
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct JobLauncher<P, T> {
    pipeline: P,
    reporter: Reporter<T>,
    niter: Option<u64>,
}

impl<P, T> JobLauncher<P, T>
where
    P: PipelineAdapter,
    T: TrackerAdapter,
{
    pub fn new(pipeline: P, reporter: Reporter<T>, niter: Option<u64>) -> Self {
        Self {
            pipeline,
            reporter,
            niter,
        }
    }

    /// Generate the DAG for `event_id` in `work_dir`, returning its path
    ///
    /// On a failed generator run the captured output is uploaded to the
    /// superevent as `pe_dag.log` before the error is returned.
    pub async fn launch(
        &self,
        event_id: &str,
        superevent_id: &str,
        config: &Path,
        work_dir: &Path,
    ) -> Result<PathBuf, WorkflowError> {
        std::fs::create_dir_all(work_dir)?;

        let invocation = PipeInvocation {
            config: config.to_path_buf(),
            work_dir: work_dir.to_path_buf(),
            event_id: event_id.to_string(),
            niter: self.niter,
        };
        let output = self.pipeline.generate(&invocation).await?;

        if !output.success() {
            log_report_failure(
                self.reporter.generation_failed(superevent_id, &output).await,
                "generation failure",
            );
            return Err(WorkflowError::PipelineGeneration {
                args: output.args,
                stdout: output.stdout,
                stderr: output.stderr,
                code: output.code,
            });
        }

        let dag = invocation.dag_path();
        if !dag.is_file() {
            return Err(WorkflowError::missing("generated DAG", dag));
        }
        tracing::info!(event_id, dag = %dag.display(), "DAG generated");
        Ok(dag)
    }
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
