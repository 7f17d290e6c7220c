// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config renderer
//!
//! Turns event attributes into a BayesWave configuration file. Output is
//! deterministic for a given template and event.

use crate::lock::check_event_id;
use crate::WorkflowError;
use gwf_adapters::{TrackerAdapter, TrackerError};
use gwf_core::{Context, ContextValue, EventAttributes, PipelineSettings, TemplateEngine};
use std::path::PathBuf;

/// Built-in BayesWave configuration template
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/bayeswave.ini");

/// Renders per-event analysis configs into a fixed directory
#[derive(Clone)]
pub struct ConfigRenderer {
    template: String,
    config_dir: PathBuf,
    engine: TemplateEngine,
}

impl ConfigRenderer {
    pub fn new(template: impl Into<String>, config_dir: PathBuf) -> Self {
        Self {
            template: template.into(),
            config_dir,
            engine: TemplateEngine::new(),
        }
    }

    /// Renderer using the configured template override, if any
    pub fn from_settings(settings: &PipelineSettings) -> Result<Self, WorkflowError> {
        let template = match &settings.template {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                WorkflowError::Configuration(format!(
                    "cannot read template {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        Ok(Self::new(template, settings.config_dir.clone()))
    }

    /// Path of the config rendered for `event_id`
    pub fn config_path(&self, event_id: &str) -> PathBuf {
        self.config_dir
            .join(format!("bayes_wave_zero_lag_{}.ini", event_id))
    }

    /// Template context for an event
    pub fn context(event: &EventAttributes) -> Context {
        let ifos = event
            .instruments
            .iter()
            .map(|ifo| {
                ContextValue::object([
                    ("name", ifo.name().to_string()),
                    ("frame_type", ifo.frame_type().to_string()),
                    ("channel", ifo.channel().to_string()),
                    ("state_flag", ifo.state_flag().to_string()),
                ])
            })
            .collect();
        Context::new()
            .with_string("event_id", event.graceid.clone())
            .with_float("gpstime", event.gpstime)
            .with_list("ifos", ifos)
    }

    /// Render the config text without writing it
    pub fn render_text(&self, event: &EventAttributes) -> Result<String, WorkflowError> {
        Ok(self.engine.render(&self.template, &Self::context(event))?)
    }

    /// Render and write the config for an event, replacing any earlier one
    pub fn render(&self, event: &EventAttributes) -> Result<PathBuf, WorkflowError> {
        let text = self.render_text(event)?;
        std::fs::create_dir_all(&self.config_dir)?;
        let path = self.config_path(&event.graceid);
        std::fs::write(&path, text)?;
        tracing::info!(event_id = %event.graceid, path = %path.display(), "config rendered");
        Ok(path)
    }

    /// Fetch an event from the tracking system and render its config
    pub async fn render_event<T: TrackerAdapter>(
        &self,
        tracker: &T,
        event_id: &str,
    ) -> Result<(EventAttributes, PathBuf), WorkflowError> {
        check_event_id(event_id)?;
        let event = fetch_event(tracker, event_id).await?;
        let path = self.render(&event)?;
        Ok((event, path))
    }
}

/// Fetch and validate the attributes of an event
pub async fn fetch_event<T: TrackerAdapter>(
    tracker: &T,
    event_id: &str,
) -> Result<EventAttributes, WorkflowError> {
    let json = match tracker.get_event(event_id).await {
        Ok(json) => json,
        Err(TrackerError::NotFound(_)) => {
            return Err(WorkflowError::Configuration(format!(
                "event {} not found",
                event_id
            )))
        }
        Err(e) => return Err(e.into()),
    };
    let event = EventAttributes::from_json(&json)?;
    if event.graceid != event_id {
        return Err(WorkflowError::Configuration(format!(
            "requested {} but tracker returned {}",
            event_id, event.graceid
        )));
    }
    Ok(event)
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
