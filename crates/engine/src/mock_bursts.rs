// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock burst events
//!
//! Replays two static burst candidates (one per search pipeline) as fresh
//! test events stamped with the current GPS time, uploads their sky maps,
//! and after a delay signs off on the superevent the tracker grouped them
//! into.

use crate::WorkflowError;
use gwf_adapters::{NewEvent, Signoff, SignoffStatus, TrackerAdapter};
use gwf_core::{Clock, MockBurstSettings, Tag, Upload};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

const DETECTORS: [&str; 4] = ["L1", "H1", "V1", "K1"];
const DUTY_CYCLE: f64 = 0.7;
const EXTRA_UPLOADS: usize = 3;

pub const VET_COMMENT: &str = "If this had been a real gravitational-wave event candidate, \
then an on-duty scientist would have left a comment here on data quality and the status of \
the detectors.";

/// Search pipelines that get a mock event, with their payload and sky map
const PIPELINES: [(&str, &str, &str); 2] = [
    ("oLIB", "olib_data.json", "BF2Y_G0-LIB_C.fits.gz"),
    ("CWB", "trigger_test.txt", "BF2Y_G0-cWB_C.fits.gz"),
];

/// Random choices for one injection, drawn up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPlan {
    pub detectors: Vec<String>,
    /// Vetting verdict per pipeline, in pipeline order
    pub verdicts: Vec<SignoffStatus>,
}

impl InjectionPlan {
    /// Sample detectors at a ~70% duty cycle, never fewer than two
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let up = (0..DETECTORS.len())
            .filter(|_| rng.gen_bool(DUTY_CYCLE))
            .count();
        let detectors = DETECTORS
            .choose_multiple(rng, up.max(2))
            .map(|d| d.to_string())
            .collect();
        let verdicts = PIPELINES
            .iter()
            .map(|_| {
                if rng.gen_bool(0.5) {
                    SignoffStatus::No
                } else {
                    SignoffStatus::Ok
                }
            })
            .collect();
        Self {
            detectors,
            verdicts,
        }
    }
}

/// One injected event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEvent {
    pub pipeline: String,
    pub graceid: String,
    /// Extra copies created to exercise deduplication
    pub duplicates: Vec<String>,
    /// Signoff left on the grouping superevent, if one was found
    pub signoff: Option<Signoff>,
}

/// Rewrite the oLIB payload's detector list and trigger time
pub fn olib_payload(template: &str, detectors: &[String], gps: f64) -> Result<String, WorkflowError> {
    let mut data: serde_json::Value = serde_json::from_str(template)
        .map_err(|e| WorkflowError::Configuration(format!("invalid oLIB payload: {}", e)))?;
    let Some(fields) = data.as_object_mut() else {
        return Err(WorkflowError::Configuration(
            "oLIB payload is not a JSON object".to_string(),
        ));
    };
    fields.insert("instruments".to_string(), detectors.join(",").into());
    fields.insert("gpstime".to_string(), gps.into());
    Ok(data.to_string())
}

/// Rewrite the `time:` line of a cWB trigger file
pub fn cwb_payload(template: &str, gps: f64) -> String {
    template
        .split_inclusive('\n')
        .map(|line| {
            if line.starts_with("time:") {
                let eol = if line.ends_with('\n') { "\n" } else { "" };
                format!("time:       {} {}{}", gps, gps, eol)
            } else {
                line.to_string()
            }
        })
        .collect()
}

fn read(dir: &Path, name: &str) -> Result<Vec<u8>, WorkflowError> {
    let path = dir.join(name);
    std::fs::read(&path).map_err(|_| WorkflowError::missing(format!("mock data {}", name), path))
}

/// Uploads mock burst events to the tracking system
pub struct MockBursts<T, C> {
    tracker: T,
    clock: C,
    settings: MockBurstSettings,
}

impl<T: TrackerAdapter, C: Clock> MockBursts<T, C> {
    pub fn new(tracker: T, clock: C, settings: MockBurstSettings) -> Self {
        Self {
            tracker,
            clock,
            settings,
        }
    }

    /// Inject with freshly sampled choices
    pub async fn inject_random(&self) -> Result<Vec<MockEvent>, WorkflowError> {
        let plan = InjectionPlan::sample(&mut rand::thread_rng());
        self.inject(&plan).await
    }

    /// Create, annotate, and vet one event per pipeline
    pub async fn inject(&self, plan: &InjectionPlan) -> Result<Vec<MockEvent>, WorkflowError> {
        let gps = self.clock.gps_now();
        let dir = &self.settings.data_dir;
        tracing::info!(gps, detectors = ?plan.detectors, "injecting mock bursts");

        let mut events = Vec::with_capacity(PIPELINES.len());
        for (pipeline, data_file, skymap_file) in PIPELINES {
            let template = String::from_utf8_lossy(&read(dir, data_file)?).into_owned();
            let payload = match pipeline {
                "oLIB" => olib_payload(&template, &plan.detectors, gps)?,
                _ => cwb_payload(&template, gps),
            };
            let skymap = read(dir, skymap_file)?;
            let new_event = NewEvent {
                filecontents: payload.into_bytes(),
                search: "MDC".to_string(),
                pipeline: pipeline.to_string(),
                group: "Test".to_string(),
            };

            let graceid = self.tracker.create_event(&new_event).await?;
            tracing::info!(pipeline, graceid = %graceid, "uploaded");

            let mut duplicates = Vec::new();
            if self.settings.simulate_multiple_uploads {
                for _ in 0..EXTRA_UPLOADS {
                    let copy = self.tracker.create_event(&new_event).await?;
                    self.upload_skymap(&copy, pipeline, &skymap).await?;
                    duplicates.push(copy);
                }
            }
            self.upload_skymap(&graceid, pipeline, &skymap).await?;

            events.push(MockEvent {
                pipeline: pipeline.to_string(),
                graceid,
                duplicates,
                signoff: None,
            });
        }

        tokio::time::sleep(self.settings.vet_delay).await;

        for (event, verdict) in events.iter_mut().zip(&plan.verdicts) {
            event.signoff = self.vet(&event.graceid, *verdict).await?;
        }
        Ok(events)
    }

    async fn upload_skymap(
        &self,
        graceid: &str,
        pipeline: &str,
        skymap: &[u8],
    ) -> Result<(), WorkflowError> {
        let upload = Upload::file(
            graceid,
            format!("{}.fits.gz", pipeline),
            skymap.to_vec(),
            format!("{} skymap fits", pipeline),
        )
        .with_tag(Tag::SkyLoc);
        self.tracker.upload(&upload).await?;
        Ok(())
    }

    /// Sign off on the superevent holding `graceid`, if there is one yet
    async fn vet(
        &self,
        graceid: &str,
        verdict: SignoffStatus,
    ) -> Result<Option<Signoff>, WorkflowError> {
        let superevents = self
            .tracker
            .get_superevents(&format!("Test event: {}", graceid))
            .await?;
        let Some(superevent_id) = superevents
            .first()
            .and_then(|s| s["superevent_id"].as_str())
        else {
            tracing::info!(graceid, "no superevent to vet");
            return Ok(None);
        };

        let signoff = Signoff {
            status: verdict,
            comment: VET_COMMENT.to_string(),
            signoff_type: "ADV".to_string(),
            superevent_id: superevent_id.to_string(),
        };
        self.tracker.create_signoff(&signoff).await?;
        Ok(Some(signoff))
    }
}

#[cfg(test)]
#[path = "mock_bursts_tests.rs"]
mod tests;
