// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work directory archival
//!
//! Copies rather than moves, so an interrupted archive never loses the
//! original. Removal of the work directory is opt-in and happens only
//! after the copy completed.

use gwf_core::CleanupSettings;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Cleanup {
    settings: CleanupSettings,
}

impl Cleanup {
    pub fn new(settings: CleanupSettings) -> Self {
        Self { settings }
    }

    /// Archive `work_dir` to `<archive_dir>/<event_id>`, returning the copy
    pub fn archive(&self, work_dir: &Path, event_id: &str) -> io::Result<PathBuf> {
        let dest = self.settings.archive_dir.join(event_id);
        copy_tree(work_dir, &dest)?;
        tracing::info!(
            event_id,
            from = %work_dir.display(),
            to = %dest.display(),
            "work directory archived"
        );

        if self.settings.remove_after_archive {
            fs::remove_dir_all(work_dir)?;
            tracing::info!(event_id, "work directory removed");
        }
        Ok(dest)
    }
}

/// Recursively copy `src` into `dest`, overwriting files that exist
fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        } else {
            // Symlinks into shared storage are not worth preserving
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
        }
    }
    Ok(())
}
