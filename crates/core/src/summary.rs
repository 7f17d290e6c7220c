// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed result summaries and their markup rendering
//!
//! Numbers are computed and rounded here, once. Rendering only formats the
//! already-rounded values, so the uploaded tables and any programmatic
//! consumer see identical figures.

use crate::event::Instrument;
use crate::template::{Context, ContextValue, TemplateEngine, TemplateError};
use serde::{Deserialize, Serialize};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Decode a log10-scaled duration into seconds, rounded to 3 places
pub fn decode_duration(log_value: f64) -> f64 {
    round_to(10f64.powf(log_value), 3)
}

/// A point estimate with a two-sided credible interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub median: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Estimate {
    pub fn new(median: f64, lower: f64, upper: f64) -> Self {
        Self {
            median,
            lower,
            upper,
        }
    }

    /// Apply `f` to all three statistics
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            median: f(self.median),
            lower: f(self.lower),
            upper: f(self.upper),
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}, {}]", self.median, self.lower, self.upper)
    }
}

/// Signal-mode summary for one instrument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSummary {
    pub instrument: Instrument,
    /// Central frequency in Hz
    pub frequency: Estimate,
    /// Bandwidth in Hz
    pub bandwidth: Estimate,
    /// Duration in seconds (already decoded from log10)
    pub duration: Estimate,
}

/// Log evidences and variances for the three competing models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub values: [f64; 3],
    pub variances: [f64; 3],
}

/// Log Bayes-factor contrasts with propagated uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayesFactors {
    /// Signal vs. Gaussian noise
    pub ln_bsg: f64,
    pub ln_bsg_err: f64,
    /// Signal vs. noise
    pub ln_bsn: f64,
    pub ln_bsn_err: f64,
}

impl BayesFactors {
    pub fn from_evidence(evidence: &Evidence) -> Self {
        let [e0, e1, e2] = evidence.values;
        let [v0, v1, v2] = evidence.variances;
        Self {
            ln_bsg: round_to(e2 - e1, 2),
            ln_bsg_err: round_to((v2 + v1).sqrt(), 2),
            ln_bsn: round_to(e2 - e0, 2),
            ln_bsn_err: round_to((v2 + v0).sqrt(), 2),
        }
    }
}

const PARAMETER_TABLE: &str = "\
<table>
<tr><th>IFO</th><th>Frequency [Hz]</th><th>Bandwidth [Hz]</th><th>Duration [s]</th></tr>
{% for row in rows %}<tr><td>{{ row.ifo }}</td><td>{{ row.frequency }}</td><td>{{ row.bandwidth }}</td><td>{{ row.duration }}</td></tr>
{% endfor %}</table>";

const BAYES_FACTOR_TABLE: &str = "\
<table>
<tr><th>ln B<sub>signal/Gaussian</sub></th><th>ln B<sub>signal/noise</sub></th></tr>
<tr><td>{{ ln_bsg }} &plusmn; {{ ln_bsg_err }}</td><td>{{ ln_bsn }} &plusmn; {{ ln_bsn_err }}</td></tr>
</table>";

/// Render the per-instrument parameter table
pub fn parameter_table(rows: &[InstrumentSummary]) -> Result<String, TemplateError> {
    let rows = rows
        .iter()
        .map(|row| {
            ContextValue::object([
                ("ifo", row.instrument.to_string()),
                ("frequency", row.frequency.to_string()),
                ("bandwidth", row.bandwidth.to_string()),
                ("duration", row.duration.to_string()),
            ])
        })
        .collect();
    render_fragment(PARAMETER_TABLE, &Context::new().with_list("rows", rows))
}

/// Render the Bayes-factor table
pub fn bayes_factor_table(factors: &BayesFactors) -> Result<String, TemplateError> {
    let context = Context::new()
        .with_string("ln_bsg", factors.ln_bsg.to_string())
        .with_string("ln_bsg_err", factors.ln_bsg_err.to_string())
        .with_string("ln_bsn", factors.ln_bsn.to_string())
        .with_string("ln_bsn_err", factors.ln_bsn_err.to_string());
    render_fragment(BAYES_FACTOR_TABLE, &context)
}

fn render_fragment(template: &str, context: &Context) -> Result<String, TemplateError> {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
