// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result harvester
//!
//! Everything is read, parsed and rendered before the first upload, so a
//! missing or malformed artifact leaves the tracking system untouched.

pub mod artifacts;
mod skymap;

use crate::report::Reporter;
use crate::WorkflowError;
use gwf_core::summary::{bayes_factor_table, parameter_table};
use gwf_core::{BayesFactors, HarvestSettings, Instrument, InstrumentSummary};
use gwf_adapters::TrackerAdapter;
use std::path::{Path, PathBuf};

/// Summaries and rendered products of one finished job
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub run_dir: PathBuf,
    pub summaries: Vec<InstrumentSummary>,
    pub factors: BayesFactors,
    pub parameter_table: String,
    pub bayes_factor_table: String,
    /// Compressed sky map written into the work directory
    pub skymap: PathBuf,
    skymap_bytes: Vec<u8>,
}

/// Read every artifact of a finished job without uploading anything
pub fn collect(
    work_dir: &Path,
    instruments: &[Instrument],
    skymap_name: &str,
) -> Result<HarvestReport, WorkflowError> {
    let run_dir = artifacts::find_run_dir(work_dir)?;

    let summaries = instruments
        .iter()
        .map(|ifo| artifacts::read_signal_mode(&run_dir, *ifo))
        .collect::<Result<Vec<_>, _>>()?;
    let factors = BayesFactors::from_evidence(&artifacts::read_evidence(&run_dir)?);

    let source = artifacts::find_skymap(&run_dir)?;
    let skymap = work_dir.join(skymap_name);
    let skymap_bytes = skymap::compress(&source, &skymap)?;

    Ok(HarvestReport {
        parameter_table: parameter_table(&summaries)?,
        bayes_factor_table: bayes_factor_table(&factors)?,
        run_dir,
        summaries,
        factors,
        skymap,
        skymap_bytes,
    })
}

/// Harvests finished jobs and uploads their products to the event
#[derive(Clone)]
pub struct Harvester<T> {
    reporter: Reporter<T>,
    settings: HarvestSettings,
}

impl<T: TrackerAdapter> Harvester<T> {
    pub fn new(reporter: Reporter<T>, settings: HarvestSettings) -> Self {
        Self { reporter, settings }
    }

    pub async fn harvest(
        &self,
        work_dir: &Path,
        event_id: &str,
        instruments: &[Instrument],
    ) -> Result<HarvestReport, WorkflowError> {
        let report = collect(work_dir, instruments, &self.settings.skymap_name)?;
        tracing::info!(
            event_id,
            run_dir = %report.run_dir.display(),
            instruments = report.summaries.len(),
            "artifacts collected"
        );

        // Sky map and report link have no ordering between them
        let report_url = self.settings.report_url(event_id);
        let (skymap, link) = tokio::join!(
            self.reporter.skymap(
                event_id,
                &self.settings.skymap_name,
                report.skymap_bytes.clone()
            ),
            self.reporter.report_link(event_id, &report_url),
        );
        skymap?;
        link?;

        self.reporter
            .table(event_id, &report.parameter_table)
            .await?;
        self.reporter
            .table(event_id, &report.bayes_factor_table)
            .await?;
        Ok(report)
    }
}

#[cfg(test)]
#[path = "harvest_tests.rs"]
mod tests;
