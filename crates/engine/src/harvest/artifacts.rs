// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating and parsing BayesWave output artifacts

use crate::WorkflowError;
use gwf_core::summary::{decode_duration, round_to};
use gwf_core::{Estimate, Evidence, Instrument, InstrumentSummary};
use std::path::{Path, PathBuf};

/// First path-sorted match of `pattern` inside `dir`
fn first_match(dir: &Path, pattern: &str, what: &str) -> Result<PathBuf, WorkflowError> {
    let wanted = dir.join(pattern);
    let base = dir
        .to_str()
        .ok_or_else(|| WorkflowError::missing(format!("{} (non UTF-8 path)", what), &wanted))?;
    let glob_pattern = format!("{}/{}", glob::Pattern::escape(base), pattern);

    let mut matches: Vec<PathBuf> = glob::glob(&glob_pattern)
        .map_err(|e| WorkflowError::Configuration(format!("bad pattern {}: {}", glob_pattern, e)))?
        .filter_map(Result::ok)
        .collect();
    matches.sort();

    if matches.len() > 1 {
        tracing::warn!(
            pattern = %glob_pattern,
            count = matches.len(),
            "several matches, using the first"
        );
    }
    matches
        .into_iter()
        .next()
        .ok_or_else(|| WorkflowError::missing(what, wanted))
}

/// The run output directory (`trigtime*`) inside a work directory
pub fn find_run_dir(work_dir: &Path) -> Result<PathBuf, WorkflowError> {
    let dir = first_match(work_dir, "trigtime*", "run output directory")?;
    if !dir.is_dir() {
        return Err(WorkflowError::missing("run output directory", dir));
    }
    Ok(dir)
}

/// The sky map (`skymap*.fits`) inside a run directory
pub fn find_skymap(run_dir: &Path) -> Result<PathBuf, WorkflowError> {
    first_match(run_dir, "skymap*.fits", "sky map")
}

pub fn signal_mode_path(run_dir: &Path, instrument: Instrument) -> PathBuf {
    run_dir
        .join("tables")
        .join(format!("signal_mode_{}.txt", instrument))
}

pub fn evidence_path(run_dir: &Path) -> PathBuf {
    run_dir.join("evidence_stacked.dat")
}

/// Non-comment, non-blank lines split into fields
fn data_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split_whitespace().collect())
}

fn number(field: &str) -> Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|_| format!("not a number: {:?}", field))
}

/// Parse a per-instrument signal-mode table
///
/// Rows are `frequency`, `bandwidth`, `duration`, each
/// `<label> <median> <lower> <upper>`; durations are stored as log10 seconds.
pub fn parse_signal_mode(text: &str, instrument: Instrument) -> Result<InstrumentSummary, String> {
    let mut rows = data_rows(text);
    let mut estimate = |label: &str| -> Result<Estimate, String> {
        let row = rows
            .next()
            .ok_or_else(|| format!("missing {} row", label))?;
        match row.as_slice() {
            [name, median, lower, upper] if *name == label => Ok(Estimate::new(
                number(median)?,
                number(lower)?,
                number(upper)?,
            )),
            [name, ..] if *name != label => Err(format!("expected {} row, found {}", label, name)),
            _ => Err(format!("{} row must have 4 fields", label)),
        }
    };

    let frequency = estimate("frequency")?.map(|v| round_to(v, 2));
    let bandwidth = estimate("bandwidth")?.map(|v| round_to(v, 2));
    let duration = estimate("duration")?.map(decode_duration);
    if let Some(extra) = rows.next() {
        return Err(format!("unexpected row after duration: {}", extra.join(" ")));
    }
    Ok(InstrumentSummary {
        instrument,
        frequency,
        bandwidth,
        duration,
    })
}

/// Parse the stacked evidence table: three `<model> <ln_evidence> <variance>` rows
pub fn parse_evidence(text: &str) -> Result<Evidence, String> {
    let rows: Vec<Vec<&str>> = data_rows(text).collect();
    if rows.len() != 3 {
        return Err(format!("expected 3 evidence rows, found {}", rows.len()));
    }

    let mut values = [0.0; 3];
    let mut variances = [0.0; 3];
    for (i, row) in rows.iter().enumerate() {
        match row.as_slice() {
            [_, value, variance] => {
                values[i] = number(value)?;
                variances[i] = number(variance)?;
            }
            _ => return Err(format!("evidence row {} must have 3 fields", i)),
        }
    }
    Ok(Evidence { values, variances })
}

fn read(path: &Path, what: &str) -> Result<String, WorkflowError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WorkflowError::missing(what, path),
        _ => WorkflowError::Io(e),
    })
}

pub fn read_signal_mode(
    run_dir: &Path,
    instrument: Instrument,
) -> Result<InstrumentSummary, WorkflowError> {
    let path = signal_mode_path(run_dir, instrument);
    let what = format!("{} signal-mode table", instrument);
    let text = read(&path, &what)?;
    parse_signal_mode(&text, instrument)
        .map_err(|reason| WorkflowError::missing(format!("{} is malformed: {}", what, reason), path))
}

pub fn read_evidence(run_dir: &Path) -> Result<Evidence, WorkflowError> {
    let path = evidence_path(run_dir);
    let text = read(&path, "evidence table")?;
    parse_evidence(&text).map_err(|reason| {
        WorkflowError::missing(format!("evidence table is malformed: {}", reason), path)
    })
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
