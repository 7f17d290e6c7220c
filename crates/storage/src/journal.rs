// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only journal of workflow runs
//!
//! One JSON object per line. Entries are never rewritten; the current state
//! of every run is recovered by replaying the file from the start.

use chrono::{DateTime, Utc};
use gwf_core::{Phase, RunId};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur in journal operations
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A recorded change to a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    RunStarted {
        run_id: RunId,
        event_id: String,
        superevent_id: String,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        run_id: RunId,
        phase: Phase,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        at: DateTime<Utc>,
    },
}

impl Operation {
    pub fn run_id(&self) -> &RunId {
        match self {
            Operation::RunStarted { run_id, .. } | Operation::PhaseChanged { run_id, .. } => run_id,
        }
    }
}

/// Journal file handle
pub struct Journal {
    file: File,
    sequence: u64,
}

impl Journal {
    /// Open or create a journal at the given path
    pub fn open(path: &Path) -> Result<Self, JournalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        let reader = BufReader::new(File::open(path)?);
        let sequence = reader.lines().count() as u64;

        Ok(Self { file, sequence })
    }

    /// Append an operation, returning its sequence number
    pub fn append(&mut self, op: &Operation) -> Result<u64, JournalError> {
        self.sequence += 1;
        let entry = JournalEntry {
            seq: self.sequence,
            op: op.clone(),
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        Ok(self.sequence)
    }

    #[cfg(test)]
    pub(crate) fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Replay all operations from the journal
    ///
    /// A missing file is an empty journal.
    pub fn replay(path: &Path) -> Result<Vec<Operation>, JournalError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut ops = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let entry: JournalEntry = serde_json::from_str(&line)?;
            ops.push(entry.op);
        }

        Ok(ops)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JournalEntry {
    seq: u64,
    op: Operation,
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
