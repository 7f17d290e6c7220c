// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gwf mock-bursts` - Inject mock burst candidates

use crate::adapters::make_tracker;
use anyhow::Result;
use clap::Args;
use gwf_core::{Settings, SystemClock};
use gwf_engine::MockBursts;

#[derive(Args)]
pub struct MockBurstsArgs {
    /// Also create three duplicate uploads per pipeline
    #[arg(long)]
    pub multiple_uploads: bool,
}

pub async fn mock_bursts(args: MockBurstsArgs, settings: Settings) -> Result<()> {
    let mut mock = settings.mock_bursts.clone();
    mock.simulate_multiple_uploads |= args.multiple_uploads;

    let injector = MockBursts::new(make_tracker(&settings)?, SystemClock, mock);
    for event in injector.inject_random().await? {
        let vetting = match &event.signoff {
            Some(s) => format!("signed off {} on {}", s.status.as_str(), s.superevent_id),
            None => "no superevent".to_string(),
        };
        println!("{:<6} {:<12} {}", event.pipeline, event.graceid, vetting);
        if !event.duplicates.is_empty() {
            println!("       duplicates: {}", event.duplicates.join(", "));
        }
    }
    Ok(())
}
