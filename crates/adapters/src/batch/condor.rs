// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTCondor adapter

use super::{submit_file_for, BatchAdapter, BatchError};
use async_trait::async_trait;
use gwf_core::BatchSettings;
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;

/// Consecutive empty history lookups tolerated before giving up.
/// History can lag the queue by a few seconds after a job leaves it.
const MAX_EMPTY_HISTORY: u32 = 10;

#[allow(clippy::expect_used)]
static CLUSTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\.\d+\s*-\s*\d+\.\d+").expect("constant regex pattern is valid")
});

/// How a job left the scheduler, from its history record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JobOutcome {
    Completed,
    Aborted,
    Failed { exit_code: Option<i32> },
}

/// Parse the cluster id out of `condor_submit -terse` output
pub(crate) fn parse_cluster_id(stdout: &str) -> Option<u64> {
    stdout
        .lines()
        .find_map(|line| CLUSTER_PATTERN.captures(line))
        .and_then(|caps| caps[1].parse().ok())
}

/// Classify `condor_history -af JobStatus ExitCode` output
///
/// Returns `None` when history has no record yet.
pub(crate) fn classify_history(stdout: &str) -> Option<JobOutcome> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
    let mut fields = line.split_whitespace();
    let status = fields.next()?;
    let exit_code = fields.next().and_then(|c| c.parse::<i32>().ok());
    Some(match status {
        "3" => JobOutcome::Aborted,
        "4" if exit_code == Some(0) => JobOutcome::Completed,
        _ => JobOutcome::Failed { exit_code },
    })
}

/// Whether `condor_q -af JobStatus` output still lists the job
pub(crate) fn still_queued(stdout: &str) -> bool {
    stdout.lines().any(|l| !l.trim().is_empty())
}

/// Directory to run a condor tool in and the file name to hand it
///
/// The tools resolve their input against the working directory, so the
/// path is passed bare once the directory is set.
pub(crate) fn in_own_dir(path: &Path) -> (Option<&Path>, &OsStr) {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let name = path.file_name().unwrap_or(path.as_os_str());
    (dir, name)
}

/// Batch adapter driving the HTCondor command-line tools
#[derive(Clone)]
pub struct CondorAdapter {
    settings: BatchSettings,
}

impl CondorAdapter {
    pub fn new(settings: BatchSettings) -> Self {
        Self { settings }
    }

    async fn run<I, S>(&self, program: &Path, args: I, cwd: Option<&Path>) -> Result<String, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }
        let output = command
            .output()
            .await
            .map_err(|e| BatchError::CommandFailed {
                program: program.display().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BatchError::CommandFailed {
                program: program.display().to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn wait(&self, cluster: u64) -> Result<(), BatchError> {
        let id = cluster.to_string();
        let mut empty_history = 0;
        loop {
            let queue = self
                .run(&self.settings.queue_executable, [id.as_str(), "-af", "JobStatus"], None)
                .await?;
            if still_queued(&queue) {
                tracing::trace!(cluster, "job still queued");
                tokio::time::sleep(self.settings.poll_interval).await;
                continue;
            }

            let history = self
                .run(
                    &self.settings.history_executable,
                    [id.as_str(), "-af", "JobStatus", "ExitCode"],
                    None,
                )
                .await?;
            match classify_history(&history) {
                Some(JobOutcome::Completed) => return Ok(()),
                Some(JobOutcome::Aborted) => return Err(BatchError::Aborted { cluster }),
                Some(JobOutcome::Failed { exit_code }) => {
                    return Err(BatchError::Failed { cluster, exit_code })
                }
                None => {
                    empty_history += 1;
                    if empty_history >= MAX_EMPTY_HISTORY {
                        return Err(BatchError::CommandFailed {
                            program: self.settings.history_executable.display().to_string(),
                            message: format!("no record of cluster {}", cluster),
                        });
                    }
                    tokio::time::sleep(self.settings.poll_interval.min(Duration::from_secs(5)))
                        .await;
                }
            }
        }
    }
}

#[async_trait]
impl BatchAdapter for CondorAdapter {
    async fn prepare(&self, dag: &Path) -> Result<PathBuf, BatchError> {
        let dag_executable = &self.settings.dag_executable;
        let (dir, name) = in_own_dir(dag);
        self.run(dag_executable, [OsStr::new("-no_submit"), name], dir)
            .await?;

        let submit_file = submit_file_for(dag);
        if !submit_file.exists() {
            return Err(BatchError::CommandFailed {
                program: dag_executable.display().to_string(),
                message: format!("{} was not produced", submit_file.display()),
            });
        }
        Ok(submit_file)
    }

    async fn submit(&self, submit_file: &Path) -> Result<(), BatchError> {
        let submit_executable = &self.settings.submit_executable;
        let (dir, name) = in_own_dir(submit_file);
        let stdout = self
            .run(submit_executable, [OsStr::new("-terse"), name], dir)
            .await?;

        let cluster = parse_cluster_id(&stdout).ok_or_else(|| BatchError::CommandFailed {
            program: submit_executable.display().to_string(),
            message: format!("unrecognized output: {}", stdout.trim()),
        })?;
        tracing::info!(cluster, "submitted");

        self.wait(cluster).await
    }
}

#[cfg(test)]
#[path = "condor_tests.rs"]
mod tests;
