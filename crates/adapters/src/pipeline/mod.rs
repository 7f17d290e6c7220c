// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline generator adapters
//!
//! The generator turns an analysis config into a batch workflow (a DAG
//! file) inside a work directory. It never submits the workflow itself.

mod bayeswave;

pub use bayeswave::BayesWavePipe;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePipeline;

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from running the generator
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file does not exist: {}", .0.display())]
    MissingConfig(PathBuf),
}

/// Arguments for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeInvocation {
    pub config: PathBuf,
    pub work_dir: PathBuf,
    pub event_id: String,
    /// Sampler iteration override
    pub niter: Option<u64>,
}

impl PipeInvocation {
    /// Generator arguments, excluding the program itself
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.config.display().to_string(),
            "--workdir".to_string(),
            self.work_dir.display().to_string(),
            "--graceID".to_string(),
            self.event_id.clone(),
        ];
        if let Some(niter) = self.niter {
            args.push("--Niter".to_string());
            args.push(niter.to_string());
        }
        args
    }

    /// Path of the workflow file a successful run leaves behind
    pub fn dag_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.dag", self.event_id))
    }
}

/// Captured result of a finished generator process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutput {
    /// Full command line, program first
    pub args: Vec<String>,
    /// Exit code, `None` when killed by a signal
    #[serde(skip)]
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Adapter for the workflow generator
#[async_trait]
pub trait PipelineAdapter: Clone + Send + Sync + 'static {
    /// Run the generator to completion
    ///
    /// A non-zero exit is not an error here; callers inspect
    /// [`ProcessOutput::success`].
    async fn generate(&self, invocation: &PipeInvocation) -> Result<ProcessOutput, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_without_iterations() {
        let inv = PipeInvocation {
            config: PathBuf::from("/cfg/bayes_wave_zero_lag_G1.ini"),
            work_dir: PathBuf::from("/jobs/G1"),
            event_id: "G1".to_string(),
            niter: None,
        };
        assert_eq!(
            inv.args(),
            vec![
                "/cfg/bayes_wave_zero_lag_G1.ini",
                "--workdir",
                "/jobs/G1",
                "--graceID",
                "G1"
            ]
        );
        assert_eq!(inv.dag_path(), PathBuf::from("/jobs/G1/G1.dag"));
    }

    #[test]
    fn args_with_iterations() {
        let inv = PipeInvocation {
            config: PathBuf::from("a.ini"),
            work_dir: PathBuf::from("wd"),
            event_id: "G2".to_string(),
            niter: Some(1000),
        };
        let args = inv.args();
        assert_eq!(&args[5..], &["--Niter", "1000"]);
        assert!(!args.iter().any(|a| a == "--condor-submit"));
    }

    #[test]
    fn success_requires_zero_exit() {
        let mut out = ProcessOutput {
            args: vec![],
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(out.success());
        out.code = Some(2);
        assert!(!out.success());
        out.code = None;
        assert!(!out.success());
    }
}
