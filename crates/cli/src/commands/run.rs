// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gwf run <event_id> <superevent_id>` - Full follow-up of one event

use crate::adapters::make_workflow;
use anyhow::{Context, Result};
use clap::Args;
use gwf_core::Settings;

#[derive(Args)]
pub struct RunArgs {
    /// Preferred event id (e.g. G330564); receives the analysis products
    pub event_id: String,

    /// Superevent id (e.g. S190425z); receives status notices
    pub superevent_id: String,
}

pub async fn run(args: RunArgs, settings: &Settings) -> Result<()> {
    let workflow = make_workflow(settings).context("cannot set up workflow")?;
    let summary = workflow.run(&args.event_id, &args.superevent_id).await?;

    println!("Run {}: {} {}", summary.run_id, args.event_id, summary.phase);
    println!("  Archive: {}", summary.archive.display());
    Ok(())
}
