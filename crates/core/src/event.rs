// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event attributes read from the tracking system
//!
//! Events are read-only to the workflow. Only the attributes needed to
//! parameterize a follow-up job are extracted; everything else in the
//! tracking-system payload is ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from interpreting an event payload
#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    #[error("missing attribute: {0}")]
    Missing(&'static str),
    #[error("malformed attribute {name}: {reason}")]
    Malformed { name: &'static str, reason: String },
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
    #[error("instrument listed twice: {0}")]
    DuplicateInstrument(Instrument),
}

/// A gravitational-wave detector
///
/// Variants are declared in canonical order; sorting a list of instruments
/// yields the order used in every generated file and table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instrument {
    H1,
    L1,
    V1,
    K1,
}

impl Instrument {
    /// All known instruments, in canonical order
    pub const ALL: [Instrument; 4] = [
        Instrument::H1,
        Instrument::L1,
        Instrument::V1,
        Instrument::K1,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::H1 => "H1",
            Instrument::L1 => "L1",
            Instrument::V1 => "V1",
            Instrument::K1 => "K1",
        }
    }

    /// Frame type the data-finding step reads strain from
    pub fn frame_type(&self) -> &'static str {
        match self {
            Instrument::H1 => "H1_HOFT_C00",
            Instrument::L1 => "L1_HOFT_C00",
            Instrument::V1 => "V1Online",
            Instrument::K1 => "K1_HOFT_C00",
        }
    }

    /// Calibrated strain channel
    pub fn channel(&self) -> &'static str {
        match self {
            Instrument::H1 => "H1:GDS-CALIB_STRAIN",
            Instrument::L1 => "L1:GDS-CALIB_STRAIN",
            Instrument::V1 => "V1:Hrec_hoft_16384Hz",
            Instrument::K1 => "K1:CAL-STRAIN_C00",
        }
    }

    /// Analysis-readiness state flag
    pub fn state_flag(&self) -> &'static str {
        match self {
            Instrument::H1 => "H1:DMT-ANALYSIS_READY:1",
            Instrument::L1 => "L1:DMT-ANALYSIS_READY:1",
            Instrument::V1 => "V1:ITF_SCIENCE:1",
            Instrument::K1 => "K1:GRD-LSC_LOCK_STATE_N_EQ_1000:1",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Instrument {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|ifo| ifo.name() == s)
            .ok_or_else(|| AttributeError::UnknownInstrument(s.to_string()))
    }
}

/// Parse an instrument list such as `"H1,L1"` into canonical order
///
/// Fails on an empty list, unknown names, or repeated names.
pub fn parse_instruments(list: &str) -> Result<Vec<Instrument>, AttributeError> {
    let mut ifos = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let ifo: Instrument = name.parse()?;
        if ifos.contains(&ifo) {
            return Err(AttributeError::DuplicateInstrument(ifo));
        }
        ifos.push(ifo);
    }
    if ifos.is_empty() {
        return Err(AttributeError::Malformed {
            name: "instruments",
            reason: "instrument list is empty".to_string(),
        });
    }
    ifos.sort();
    Ok(ifos)
}

/// Attributes of a candidate event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttributes {
    pub graceid: String,
    pub gpstime: f64,
    pub instruments: Vec<Instrument>,
    pub superevent: Option<String>,
    pub pipeline: Option<String>,
    pub group: Option<String>,
    pub search: Option<String>,
}

impl EventAttributes {
    /// Interpret a tracking-system event payload
    pub fn from_json(value: &serde_json::Value) -> Result<Self, AttributeError> {
        let graceid = value
            .get("graceid")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or(AttributeError::Missing("graceid"))?
            .to_string();

        let gpstime = match value.get("gpstime") {
            None | Some(serde_json::Value::Null) => return Err(AttributeError::Missing("gpstime")),
            Some(v) => v.as_f64().ok_or_else(|| AttributeError::Malformed {
                name: "gpstime",
                reason: format!("expected a number, got {}", v),
            })?,
        };

        let instruments = match value.get("instruments") {
            None | Some(serde_json::Value::Null) => {
                return Err(AttributeError::Missing("instruments"))
            }
            Some(serde_json::Value::String(list)) => parse_instruments(list)?,
            Some(serde_json::Value::Array(items)) => {
                let names: Result<Vec<&str>, AttributeError> = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| AttributeError::Malformed {
                            name: "instruments",
                            reason: format!("expected a string, got {}", item),
                        })
                    })
                    .collect();
                parse_instruments(&names?.join(","))?
            }
            Some(other) => {
                return Err(AttributeError::Malformed {
                    name: "instruments",
                    reason: format!("expected a list, got {}", other),
                })
            }
        };

        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);

        Ok(Self {
            graceid,
            gpstime,
            instruments,
            superevent: text("superevent"),
            pipeline: text("pipeline"),
            group: text("group"),
            search: text("search"),
        })
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
