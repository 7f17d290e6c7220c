// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gwf status` - Latest phase of every recorded run

use crate::output::{print_list, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use gwf_core::Settings;
use gwf_storage::{Journal, MaterializedState, RunRecord};

#[derive(Args)]
pub struct StatusArgs {
    /// Only show runs for this event
    #[arg(long)]
    pub event: Option<String>,

    /// Only show the run with this id or unique id prefix
    #[arg(long, conflicts_with = "event")]
    pub run: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn status(args: StatusArgs, settings: &Settings) -> Result<()> {
    let path = settings.pipeline.journal_path();
    let ops = Journal::replay(&path)
        .with_context(|| format!("cannot read run journal {}", path.display()))?;
    let state = MaterializedState::from_operations(&ops);

    let mut runs: Vec<&RunRecord> = match (&args.run, &args.event) {
        (Some(prefix), _) => match state.get_run(prefix) {
            Some(run) => vec![run],
            None => anyhow::bail!("no run matches {}", prefix),
        },
        (None, Some(event_id)) => state.runs_for_event(event_id),
        (None, None) => state.runs.values().collect(),
    };
    runs.sort_by_key(|r| r.started_at);

    if runs.is_empty() && matches!(args.format, OutputFormat::Text) {
        println!("No runs");
        return Ok(());
    }

    let header = format!(
        "{:<38} {:<12} {:<12} {:<11} UPDATED",
        "RUN", "EVENT", "SUPEREVENT", "PHASE"
    );
    print_list(&runs, &header, args.format);
    Ok(())
}
