// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake batch scheduler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{submit_file_for, BatchAdapter, BatchError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCall {
    Prepare { dag: PathBuf },
    Submit { submit_file: PathBuf },
}

/// Scripted result of a submitted job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FakeOutcome {
    #[default]
    Success,
    Aborted,
    Failed(Option<i32>),
}

#[derive(Default)]
struct FakeBatchState {
    outcome: FakeOutcome,
    prepare_fails: bool,
    calls: Vec<BatchCall>,
}

/// Scheduler whose jobs finish instantly with a scripted outcome
#[derive(Clone, Default)]
pub struct FakeBatch {
    inner: Arc<Mutex<FakeBatchState>>,
}

impl FakeBatch {
    /// Cluster id reported in scripted failures
    pub const CLUSTER: u64 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outcome(&self, outcome: FakeOutcome) {
        self.lock().outcome = outcome;
    }

    /// Make `prepare` fail as if the scheduler tool had crashed
    pub fn set_prepare_fails(&self, fails: bool) {
        self.lock().prepare_fails = fails;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BatchCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeBatchState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BatchAdapter for FakeBatch {
    async fn prepare(&self, dag: &Path) -> Result<PathBuf, BatchError> {
        let fails = {
            let mut state = self.lock();
            state.calls.push(BatchCall::Prepare {
                dag: dag.to_path_buf(),
            });
            state.prepare_fails
        };
        if fails {
            return Err(BatchError::CommandFailed {
                program: "condor_submit_dag".to_string(),
                message: "scripted failure".to_string(),
            });
        }

        let submit_file = submit_file_for(dag);
        std::fs::write(&submit_file, "").map_err(|e| BatchError::CommandFailed {
            program: "condor_submit_dag".to_string(),
            message: e.to_string(),
        })?;
        Ok(submit_file)
    }

    async fn submit(&self, submit_file: &Path) -> Result<(), BatchError> {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(BatchCall::Submit {
                submit_file: submit_file.to_path_buf(),
            });
            state.outcome
        };
        match outcome {
            FakeOutcome::Success => Ok(()),
            FakeOutcome::Aborted => Err(BatchError::Aborted {
                cluster: Self::CLUSTER,
            }),
            FakeOutcome::Failed(exit_code) => Err(BatchError::Failed {
                cluster: Self::CLUSTER,
                exit_code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prepare_writes_submit_file() {
        let dir = tempfile::tempdir().unwrap();
        let dag = dir.path().join("G1.dag");
        let fake = FakeBatch::new();

        let sub = fake.prepare(&dag).await.unwrap();
        assert!(sub.exists());
        assert_eq!(fake.calls(), vec![BatchCall::Prepare { dag }]);
    }

    #[tokio::test]
    async fn scripted_outcomes() {
        let fake = FakeBatch::new();
        let sub = Path::new("G1.dag.condor.sub");
        assert!(fake.submit(sub).await.is_ok());

        fake.set_outcome(FakeOutcome::Aborted);
        assert!(matches!(
            fake.submit(sub).await,
            Err(BatchError::Aborted { .. })
        ));

        fake.set_outcome(FakeOutcome::Failed(Some(1)));
        assert!(matches!(
            fake.submit(sub).await,
            Err(BatchError::Failed { exit_code: Some(1), .. })
        ));
        assert_eq!(fake.calls().len(), 3);
    }
}
