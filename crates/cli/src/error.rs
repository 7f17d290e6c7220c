// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use gwf_core::settings::CONFIG_ENV;
use gwf_core::SettingsError;
use gwf_engine::WorkflowError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct GwfError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl GwfError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Explain a command failure, adding suggestions for known causes
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(workflow) = err.downcast_ref::<WorkflowError>() {
            return Self::from_workflow(workflow);
        }
        if let Some(settings) = err.downcast_ref::<SettingsError>() {
            return GwfError::new(settings.to_string()).with_suggestion(format!(
                "Point --config or ${} at a valid TOML settings file",
                CONFIG_ENV
            ));
        }

        let mut explained = GwfError::new(err.to_string());
        for cause in err.chain().skip(1) {
            explained = explained.with_context(cause.to_string());
        }
        explained
    }

    fn from_workflow(err: &WorkflowError) -> Self {
        let base = GwfError::new(err.to_string());
        match err {
            WorkflowError::AlreadyRunning { event_id } => Self::already_running(event_id),
            WorkflowError::Configuration(_) => base
                .with_context("The event may not exist or lacks instrument or time attributes")
                .with_suggestion("Check the [tracker] url and token in the settings file"),
            WorkflowError::PipelineGeneration { stderr, .. } => {
                let base = base.with_suggestion("The generator log was uploaded as pe_dag.log");
                match stderr.lines().last() {
                    Some(line) => base.with_context(line.to_string()),
                    None => base,
                }
            }
            WorkflowError::SubmissionAborted { cluster } => base
                .with_context("The job was removed from the queue before it finished")
                .with_suggestion(format!("Inspect it with: condor_history {}", cluster)),
            WorkflowError::SubmissionFailed { cluster, .. } => base
                .with_suggestion(format!("Inspect it with: condor_history -long {}", cluster)),
            WorkflowError::MissingArtifact { .. } => base
                .with_context("The job may have finished without producing every output")
                .with_suggestion(
                    "Retry once the outputs exist: gwf harvest <work_dir> <event_id> <superevent_id>",
                ),
            _ => base,
        }
    }

    /// Error for when another run holds the event lock.
    pub fn already_running(event_id: &str) -> Self {
        GwfError::new(format!("A follow-up for {} is already running", event_id))
            .with_context("Only one run per event may use its work directory")
            .with_suggestion("Wait for the current run to finish")
            .with_suggestion(format!("Check progress: gwf status --event {}", event_id))
    }
}

impl fmt::Display for GwfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for GwfError {}
