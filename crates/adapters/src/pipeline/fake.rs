// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake pipeline generator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PipeInvocation, PipelineAdapter, PipelineError, ProcessOutput};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

struct FakePipelineState {
    code: i32,
    stdout: String,
    stderr: String,
    write_dag: bool,
    invocations: Vec<PipeInvocation>,
}

impl Default for FakePipelineState {
    fn default() -> Self {
        Self {
            code: 0,
            stdout: String::new(),
            stderr: String::new(),
            write_dag: true,
            invocations: Vec::new(),
        }
    }
}

/// Generator that succeeds and writes an empty DAG unless scripted otherwise
#[derive(Clone, Default)]
pub struct FakePipeline {
    inner: Arc<Mutex<FakePipelineState>>,
}

impl FakePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next runs exit with `code` and the given output
    pub fn set_exit(&self, code: i32, stdout: &str, stderr: &str) {
        let mut state = self.lock();
        state.code = code;
        state.stdout = stdout.to_string();
        state.stderr = stderr.to_string();
    }

    /// Whether a successful run leaves a DAG file behind
    pub fn set_write_dag(&self, write_dag: bool) {
        self.lock().write_dag = write_dag;
    }

    /// Get all recorded invocations
    pub fn invocations(&self) -> Vec<PipeInvocation> {
        self.lock().invocations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakePipelineState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PipelineAdapter for FakePipeline {
    async fn generate(&self, invocation: &PipeInvocation) -> Result<ProcessOutput, PipelineError> {
        let (code, stdout, stderr, write_dag) = {
            let mut state = self.lock();
            state.invocations.push(invocation.clone());
            (
                state.code,
                state.stdout.clone(),
                state.stderr.clone(),
                state.write_dag,
            )
        };

        if code == 0 && write_dag {
            let dag = invocation.dag_path();
            std::fs::create_dir_all(&invocation.work_dir)
                .and_then(|_| std::fs::write(&dag, "JOB bayeswave bayeswave.sub\n"))
                .map_err(|source| PipelineError::Spawn {
                    program: "fake_pipe".to_string(),
                    source,
                })?;
        }

        let mut args = vec!["bayeswave_pipe".to_string()];
        args.extend(invocation.args());
        Ok(ProcessOutput {
            args,
            code: Some(code),
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(dir: &std::path::Path) -> PipeInvocation {
        PipeInvocation {
            config: dir.join("bw.ini"),
            work_dir: dir.join("G1"),
            event_id: "G1".to_string(),
            niter: None,
        }
    }

    #[tokio::test]
    async fn default_run_writes_dag() {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakePipeline::new();
        let inv = invocation(dir.path());

        let out = fake.generate(&inv).await.unwrap();
        assert!(out.success());
        assert!(inv.dag_path().exists());
        assert_eq!(fake.invocations(), vec![inv]);
    }

    #[tokio::test]
    async fn failing_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakePipeline::new();
        fake.set_exit(1, "", "boom");
        let inv = invocation(dir.path());

        let out = fake.generate(&inv).await.unwrap();
        assert_eq!(out.code, Some(1));
        assert_eq!(out.stderr, "boom");
        assert!(!inv.dag_path().exists());
    }
}
