// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bayeswave_pipe` process adapter

use super::{PipeInvocation, PipelineAdapter, PipelineError, ProcessOutput};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Sources the environment file, then replaces the shell with the generator
const ENV_WRAPPER: &str = ". \"$0\" && exec \"$@\"";

/// Runs the BayesWave workflow generator as a child process
#[derive(Clone)]
pub struct BayesWavePipe {
    executable: PathBuf,
    user_env_file: Option<PathBuf>,
}

impl BayesWavePipe {
    pub fn new(executable: PathBuf, user_env_file: Option<PathBuf>) -> Self {
        Self {
            executable,
            user_env_file,
        }
    }

    /// Program and arguments for an invocation
    fn program_and_args(&self, invocation: &PipeInvocation) -> (String, Vec<String>) {
        let exe = self.executable.display().to_string();
        let env_file = self.user_env_file.as_ref().filter(|f| f.exists());
        let (program, mut args) = match env_file {
            Some(env_file) => (
                "sh".to_string(),
                vec![
                    "-c".to_string(),
                    ENV_WRAPPER.to_string(),
                    env_file.display().to_string(),
                    exe,
                ],
            ),
            None => (exe, Vec::new()),
        };
        args.extend(invocation.args());
        (program, args)
    }

    /// Full command line for an invocation, program first
    #[cfg(test)]
    pub(crate) fn command_line(&self, invocation: &PipeInvocation) -> Vec<String> {
        let (program, args) = self.program_and_args(invocation);
        std::iter::once(program).chain(args).collect()
    }
}

#[async_trait]
impl PipelineAdapter for BayesWavePipe {
    async fn generate(&self, invocation: &PipeInvocation) -> Result<ProcessOutput, PipelineError> {
        let (program, args) = self.program_and_args(invocation);

        let output = Command::new(&program)
            .args(&args)
            .output()
            .await
            .map_err(|source| PipelineError::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            args: std::iter::once(program).chain(args).collect(),
        })
    }
}

#[cfg(test)]
#[path = "bayeswave_tests.rs"]
mod tests;
