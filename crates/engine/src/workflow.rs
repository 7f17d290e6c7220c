// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow runner
//!
//! Chains the stages of one follow-up run: render, launch, submit,
//! harvest, report, clean up. Each stage starts only after its predecessor
//! succeeded and receives that predecessor's result. Every phase change is
//! journaled; the first failure ends the run.

use crate::cleanup::Cleanup;
use crate::harvest::{HarvestReport, Harvester};
use crate::launch::JobLauncher;
use crate::lock::EventLock;
use crate::render::{fetch_event, ConfigRenderer};
use crate::report::{log_report_failure, Reporter};
use crate::submit::SubmissionBridge;
use crate::WorkflowError;
use gwf_adapters::{BatchAdapter, PipelineAdapter, TrackerAdapter};
use gwf_core::{Clock, IdGen, Phase, PhaseEvent, PipelineSettings, RunId, Settings};
use gwf_storage::{Journal, Operation};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Instrument;

/// Adapter dependencies of a workflow
pub struct WorkflowDeps<T, P, B> {
    pub tracker: T,
    pub pipeline: P,
    pub batch: B,
}

/// Final state of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: RunId,
    pub phase: Phase,
    pub archive: PathBuf,
}

/// A run in progress
struct ActiveRun {
    id: RunId,
    phase: Phase,
}

/// Runs follow-up workflows for events
pub struct Workflow<T, P, B, C: Clock, I: IdGen> {
    renderer: ConfigRenderer,
    launcher: JobLauncher<P, T>,
    bridge: SubmissionBridge<B, T>,
    harvester: Harvester<T>,
    cleanup: Cleanup,
    reporter: Reporter<T>,
    paths: PipelineSettings,
    journal: Arc<Mutex<Journal>>,
    clock: C,
    id_gen: I,
}

impl<T, P, B, C, I> Workflow<T, P, B, C, I>
where
    T: TrackerAdapter,
    P: PipelineAdapter,
    B: BatchAdapter,
    C: Clock,
    I: IdGen,
{
    /// Build a workflow from settings, opening the run journal
    pub fn new(
        deps: WorkflowDeps<T, P, B>,
        settings: &Settings,
        clock: C,
        id_gen: I,
    ) -> Result<Self, WorkflowError> {
        let reporter = Reporter::new(deps.tracker);
        let journal = Journal::open(&settings.pipeline.journal_path())?;
        Ok(Self {
            renderer: ConfigRenderer::from_settings(&settings.pipeline)?,
            launcher: JobLauncher::new(deps.pipeline, reporter.clone(), settings.pipeline.niter),
            bridge: SubmissionBridge::new(deps.batch, reporter.clone()),
            harvester: Harvester::new(reporter.clone(), settings.harvest.clone()),
            cleanup: Cleanup::new(settings.cleanup.clone()),
            reporter,
            paths: settings.pipeline.clone(),
            journal: Arc::new(Mutex::new(journal)),
            clock,
            id_gen,
        })
    }

    /// Render the config for an event without launching anything
    pub async fn render(&self, event_id: &str) -> Result<PathBuf, WorkflowError> {
        let (_, path) = self
            .renderer
            .render_event(self.reporter.tracker(), event_id)
            .await?;
        Ok(path)
    }

    /// Run the full workflow for an event
    ///
    /// Status and failure notices go to `superevent_id`; analysis products
    /// go to `event_id`.
    pub async fn run(&self, event_id: &str, superevent_id: &str) -> Result<RunSummary, WorkflowError> {
        let _lock = EventLock::acquire(&self.paths.lock_dir(), event_id)?;

        let mut run = ActiveRun {
            id: self.id_gen.next(),
            phase: Phase::Pending,
        };
        self.record(Operation::RunStarted {
            run_id: run.id.clone(),
            event_id: event_id.to_string(),
            superevent_id: superevent_id.to_string(),
            at: self.clock.now(),
        })?;

        let span = tracing::info_span!("workflow.run", run_id = %run.id, event_id, superevent_id);
        async {
            tracing::info!("starting");
            match self.stages(&mut run, event_id, superevent_id).await {
                Ok(archive) => {
                    tracing::info!(phase = %run.phase, "run complete");
                    Ok(RunSummary {
                        run_id: run.id.clone(),
                        phase: run.phase,
                        archive,
                    })
                }
                Err(err) => {
                    self.fail(&mut run, superevent_id, &err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn stages(
        &self,
        run: &mut ActiveRun,
        event_id: &str,
        superevent_id: &str,
    ) -> Result<PathBuf, WorkflowError> {
        let (event, config) = self
            .renderer
            .render_event(self.reporter.tracker(), event_id)
            .await?;
        self.advance(run, PhaseEvent::Configured, None)?;

        log_report_failure(
            self.reporter.launched(superevent_id, event_id).await,
            "launch",
        );
        let work_dir = self.paths.work_dir(event_id);
        let dag = self
            .launcher
            .launch(event_id, superevent_id, &config, &work_dir)
            .await?;
        self.advance(run, PhaseEvent::Launched, None)?;

        let submit_file = self.bridge.prepare(&dag).await?;
        self.advance(run, PhaseEvent::Submitted, None)?;
        self.bridge.run(&submit_file, superevent_id).await?;

        self.harvester
            .harvest(&work_dir, event_id, &event.instruments)
            .await?;
        self.advance(run, PhaseEvent::Harvested, None)?;

        self.reporter.finished(superevent_id).await?;
        let archive = self.cleanup.archive(&work_dir, event_id)?;
        self.advance(run, PhaseEvent::Cleaned, None)?;
        Ok(archive)
    }

    /// Harvest, announce and archive a job that already finished
    pub async fn finish(
        &self,
        work_dir: &Path,
        event_id: &str,
        superevent_id: &str,
    ) -> Result<HarvestReport, WorkflowError> {
        let _lock = EventLock::acquire(&self.paths.lock_dir(), event_id)?;

        let result = async {
            let event = fetch_event(self.reporter.tracker(), event_id).await?;
            let report = self
                .harvester
                .harvest(work_dir, event_id, &event.instruments)
                .await?;
            self.reporter.finished(superevent_id).await?;
            self.cleanup.archive(work_dir, event_id)?;
            Ok::<_, WorkflowError>(report)
        }
        .await;

        if let Err(err) = &result {
            if !err.is_reported() {
                log_report_failure(self.reporter.halted(superevent_id, err).await, "halt");
            }
        }
        result
    }

    /// Report and journal the failure that ended a run
    async fn fail(&self, run: &mut ActiveRun, superevent_id: &str, err: &WorkflowError) {
        tracing::error!(phase = %run.phase, error = %err, "run failed");

        let event = match err {
            WorkflowError::SubmissionAborted { .. } => PhaseEvent::Aborted,
            WorkflowError::SubmissionFailed { .. } => PhaseEvent::Failed,
            _ => PhaseEvent::Halt,
        };
        if !err.is_reported() {
            log_report_failure(self.reporter.halted(superevent_id, err).await, "halt");
        }
        if let Err(e) = self.advance(run, event, Some(err.to_string())) {
            tracing::error!(error = %e, "failed to journal run failure");
        }
    }

    fn advance(
        &self,
        run: &mut ActiveRun,
        event: PhaseEvent,
        reason: Option<String>,
    ) -> Result<(), WorkflowError> {
        let next = run.phase.transition(event)?;
        self.record(Operation::PhaseChanged {
            run_id: run.id.clone(),
            phase: next,
            reason,
            at: self.clock.now(),
        })?;
        tracing::info!(from = %run.phase, to = %next, "phase changed");
        run.phase = next;
        Ok(())
    }

    fn record(&self, op: Operation) -> Result<(), WorkflowError> {
        let mut journal = self.journal.lock().unwrap_or_else(|e| e.into_inner());
        journal.append(&op)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
