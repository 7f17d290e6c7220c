// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gwf render <event_id>` - Write the pipeline configuration only

use crate::adapters::make_tracker;
use anyhow::Result;
use clap::Args;
use gwf_core::Settings;
use gwf_engine::ConfigRenderer;

#[derive(Args)]
pub struct RenderArgs {
    /// Event to render the configuration for
    pub event_id: String,
}

pub async fn render(args: RenderArgs, settings: &Settings) -> Result<()> {
    let renderer = ConfigRenderer::from_settings(&settings.pipeline)?;
    let tracker = make_tracker(settings)?;
    let (event, path) = renderer.render_event(&tracker, &args.event_id).await?;

    let instruments: Vec<String> = event.instruments.iter().map(|i| i.to_string()).collect();
    tracing::info!(instruments = %instruments.join(","), "rendered");
    println!("{}", path.display());
    Ok(())
}
