// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-event exclusive lock
//!
//! Work directories are keyed only by event id, so two runs for the same
//! event must never overlap. The lock is an advisory `flock` on
//! `<lock_dir>/<event_id>.lock`, held for the lifetime of the guard.

use crate::WorkflowError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reject event ids that are not a plain file name component
///
/// Ids are joined into lock, work and config paths, so only letters,
/// digits, `-` and `_` are accepted.
pub(crate) fn check_event_id(event_id: &str) -> Result<(), WorkflowError> {
    let plain = !event_id.is_empty()
        && event_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        Ok(())
    } else {
        Err(WorkflowError::Configuration(format!(
            "invalid event id {:?}",
            event_id
        )))
    }
}

/// Guard for an exclusively locked event
#[derive(Debug)]
pub struct EventLock {
    file: File,
    path: PathBuf,
}

impl EventLock {
    /// Take the lock for `event_id`, failing fast if another run holds it
    pub fn acquire(lock_dir: &Path, event_id: &str) -> Result<Self, WorkflowError> {
        check_event_id(event_id)?;
        std::fs::create_dir_all(lock_dir)?;
        let path = lock_dir.join(format!("{}.lock", event_id));
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Err(WorkflowError::AlreadyRunning {
                    event_id: event_id.to_string(),
                });
            }
            return Err(e.into());
        }

        // Record the owner for operators; the lock itself is what matters
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        tracing::debug!(path = %path.display(), "event lock acquired");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EventLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release event lock");
        }
    }
}
