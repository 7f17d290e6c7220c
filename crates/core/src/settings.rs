// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow settings
//!
//! Every location and external executable the workflow touches is supplied
//! here and handed to each component at construction time. Settings are
//! read from TOML; any key left out falls back to a default rooted in the
//! user's home directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "GWF_CONFIG";

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn zero_lag_root() -> PathBuf {
    home().join("O3").join("zero_lag")
}

/// Expand a leading `~/` against the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home().join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tracker: TrackerSettings,
    pub pipeline: PipelineSettings,
    pub batch: BatchSettings,
    pub harvest: HarvestSettings,
    pub cleanup: CleanupSettings,
    pub mock_bursts: MockBurstSettings,
}

/// Tracking-system client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Base URL of the REST API, with trailing slash
    pub url: String,
    /// Bearer token, if the service requires one
    pub token: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            url: "https://gracedb.ligo.org/api/".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// External pipeline generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub executable: PathBuf,
    /// Shell script sourced before the generator runs, when it exists
    pub user_env_file: Option<PathBuf>,
    /// Configuration template; the built-in BayesWave template when unset
    pub template: Option<PathBuf>,
    /// Sampler iteration override passed as `--Niter`
    pub niter: Option<u64>,
    /// Where rendered configuration files are written
    pub config_dir: PathBuf,
    /// Parent of the per-event work directories
    pub jobs_dir: PathBuf,
    /// Per-event lock files; `<jobs_dir>/.locks` when unset
    pub lock_dir: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        let bw = home().join("O3").join("BW");
        Self {
            executable: bw.join("bin").join("bayeswave_pipe"),
            user_env_file: Some(bw.join("etc").join("bayeswave-user-env.sh")),
            template: None,
            niter: None,
            config_dir: zero_lag_root(),
            jobs_dir: zero_lag_root().join("jobs"),
            lock_dir: None,
        }
    }
}

impl PipelineSettings {
    /// Work directory for an event
    pub fn work_dir(&self, event_id: &str) -> PathBuf {
        self.jobs_dir.join(event_id)
    }

    pub fn lock_dir(&self) -> PathBuf {
        self.lock_dir
            .clone()
            .unwrap_or_else(|| self.jobs_dir.join(".locks"))
    }

    /// Run journal location
    pub fn journal_path(&self) -> PathBuf {
        self.jobs_dir.join("journal.jsonl")
    }
}

/// Batch scheduler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    pub submit_executable: PathBuf,
    pub dag_executable: PathBuf,
    pub queue_executable: PathBuf,
    pub history_executable: PathBuf,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            submit_executable: PathBuf::from("condor_submit"),
            dag_executable: PathBuf::from("condor_submit_dag"),
            queue_executable: PathBuf::from("condor_q"),
            history_executable: PathBuf::from("condor_history"),
        }
    }
}

/// Result harvesting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    /// Web report URL; `{event_id}` is replaced with the event id
    pub report_url: String,
    /// Canonical name of the compressed sky map
    pub skymap_name: String,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            report_url: "https://ldas-jobs.ligo.caltech.edu/~bayeswave/O3/zero_lag/jobs/{event_id}/"
                .to_string(),
            skymap_name: "bayeswave.fits.gz".to_string(),
        }
    }
}

impl HarvestSettings {
    pub fn report_url(&self, event_id: &str) -> String {
        self.report_url.replace("{event_id}", event_id)
    }
}

/// Work directory archival settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    pub archive_dir: PathBuf,
    /// Remove the work directory once the archive copy succeeded
    pub remove_after_archive: bool,
}

impl Default for CleanupSettings {
    fn default() -> Self {
        Self {
            archive_dir: zero_lag_root().join("archive"),
            remove_after_archive: false,
        }
    }
}

/// Mock burst injection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockBurstSettings {
    /// Directory holding the static payloads and sky maps
    pub data_dir: PathBuf,
    /// Create three extra copies of each event to exercise deduplication
    pub simulate_multiple_uploads: bool,
    /// Wait between upload and vetting
    #[serde(with = "humantime_serde")]
    pub vet_delay: Duration,
}

impl Default for MockBurstSettings {
    fn default() -> Self {
        Self {
            data_dir: home().join("O3").join("first2years_bursts"),
            simulate_multiple_uploads: false,
            vet_delay: Duration::from_secs(600),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(settings.expanded())
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve settings from an explicit path, `$GWF_CONFIG`, or the user
    /// config directory, falling back to defaults when no file exists
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("gwf").join("gwf.toml");
            if path.exists() {
                return Self::load(&path);
            }
        }
        tracing::debug!("no settings file found, using defaults");
        Ok(Self::default())
    }

    fn expanded(mut self) -> Self {
        let p = &mut self.pipeline;
        p.executable = expand_home(&p.executable);
        p.user_env_file = p.user_env_file.as_deref().map(expand_home);
        p.template = p.template.as_deref().map(expand_home);
        p.config_dir = expand_home(&p.config_dir);
        p.jobs_dir = expand_home(&p.jobs_dir);
        p.lock_dir = p.lock_dir.as_deref().map(expand_home);
        self.cleanup.archive_dir = expand_home(&self.cleanup.archive_dir);
        self.mock_bursts.data_dir = expand_home(&self.mock_bursts.data_dir);
        self
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
