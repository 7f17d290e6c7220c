// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow factory for CLI commands

use anyhow::Result;
use gwf_adapters::{
    BayesWavePipe, CondorAdapter, GraceDbTracker, TracedBatch, TracedPipeline, TracedTracker,
};
use gwf_core::{Settings, SystemClock, UuidIdGen};
use gwf_engine::{Workflow, WorkflowDeps};

pub type Tracker = TracedTracker<GraceDbTracker>;

pub type ProductionWorkflow = Workflow<
    Tracker,
    TracedPipeline<BayesWavePipe>,
    TracedBatch<CondorAdapter>,
    SystemClock,
    UuidIdGen,
>;

/// Tracking-system client with tracing
pub fn make_tracker(settings: &Settings) -> Result<Tracker> {
    Ok(TracedTracker::new(GraceDbTracker::new(&settings.tracker)?))
}

/// Create a production workflow with real adapters
pub fn make_workflow(settings: &Settings) -> Result<ProductionWorkflow> {
    let deps = WorkflowDeps {
        tracker: make_tracker(settings)?,
        pipeline: TracedPipeline::new(BayesWavePipe::new(
            settings.pipeline.executable.clone(),
            settings.pipeline.user_env_file.clone(),
        )),
        batch: TracedBatch::new(CondorAdapter::new(settings.batch.clone())),
    };
    Ok(Workflow::new(deps, settings, SystemClock, UuidIdGen)?)
}
