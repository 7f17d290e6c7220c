//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Tracker URL that refuses connections immediately
pub const UNREACHABLE_TRACKER: &str = "http://127.0.0.1:9/api/";

/// A scratch directory with a settings file rooted inside it
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Settings pointing every location into the scratch directory
    pub fn empty() -> Self {
        let project = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        let root = project.path().display().to_string();
        project.file(
            "gwf.toml",
            &format!(
                r#"[tracker]
url = "{UNREACHABLE_TRACKER}"
timeout = "2s"

[pipeline]
executable = "{root}/bin/bayeswave_pipe"
config_dir = "{root}/configs"
jobs_dir = "{root}/jobs"

[cleanup]
archive_dir = "{root}/archive"

[mock_bursts]
data_dir = "{root}/mock"
vet_delay = "0s"
"#
            ),
        );
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn journal_path(&self) -> PathBuf {
        self.path().join("jobs/journal.jsonl")
    }

    /// Write a file relative to the project root
    pub fn file(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// The gwf binary configured for this project
    pub fn gwf(&self) -> Gwf {
        let mut cmd = Command::cargo_bin("gwf").unwrap();
        cmd.current_dir(self.path())
            .env("GWF_CONFIG", self.path().join("gwf.toml"))
            .env("RUST_LOG", "warn");
        Gwf { cmd }
    }
}

/// A gwf invocation under construction
pub struct Gwf {
    cmd: Command,
}

impl Gwf {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Run and require a zero exit
    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            outcome.success,
            "expected success\nstdout:\n{}\nstderr:\n{}",
            outcome.stdout,
            outcome.stderr
        );
        outcome
    }

    /// Run and require a nonzero exit
    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(
            !outcome.success,
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            outcome.stdout,
            outcome.stderr
        );
        outcome
    }
}

/// Captured result of one invocation
pub struct Outcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "stdout unexpectedly has {:?}:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}:\n{}",
            needle,
            self.stderr
        );
        self
    }
}

/// A journal line for a run that started
pub fn run_started(seq: u64, run_id: &str, event_id: &str, at: &str) -> String {
    format!(
        r#"{{"seq":{seq},"op":{{"op":"run_started","run_id":"{run_id}","event_id":"{event_id}","superevent_id":"S1","at":"{at}"}}}}"#
    )
}

/// A journal line for a phase change
pub fn phase_changed(seq: u64, run_id: &str, phase: &str, at: &str) -> String {
    format!(
        r#"{{"seq":{seq},"op":{{"op":"phase_changed","run_id":"{run_id}","phase":"{phase}","at":"{at}"}}}}"#
    )
}
