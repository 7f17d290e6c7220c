// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gwf harvest <work_dir> <event_id> <superevent_id>` - Finish a completed job

use crate::adapters::make_workflow;
use anyhow::{Context, Result};
use clap::Args;
use gwf_core::Settings;
use std::path::PathBuf;

#[derive(Args)]
pub struct HarvestArgs {
    /// Work directory of the finished job
    pub work_dir: PathBuf,

    /// Preferred event id; receives the analysis products
    pub event_id: String,

    /// Superevent id; receives the completion notice
    pub superevent_id: String,
}

pub async fn harvest(args: HarvestArgs, settings: &Settings) -> Result<()> {
    let workflow = make_workflow(settings).context("cannot set up workflow")?;
    let report = workflow
        .finish(&args.work_dir, &args.event_id, &args.superevent_id)
        .await?;

    println!("Harvested {}", report.run_dir.display());
    println!(
        "  ln BSG: {} ± {}",
        report.factors.ln_bsg, report.factors.ln_bsg_err
    );
    println!(
        "  ln BSN: {} ± {}",
        report.factors.ln_bsn, report.factors.ln_bsn_err
    );
    println!("  Sky map: {}", report.skymap.display());
    Ok(())
}
