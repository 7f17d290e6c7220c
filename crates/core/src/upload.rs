// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status messages sent to the tracking system
//!
//! Uploads are append-only: once sent they are never edited or removed.

use serde::{Deserialize, Serialize};

/// Label attached to an upload so consumers can filter the event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Parameter estimation results and progress
    Pe,
    /// Sky localization products
    SkyLoc,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Pe => "pe",
            Tag::SkyLoc => "sky_loc",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single upload to the tracking system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File content, if a file is attached
    pub content: Option<Vec<u8>>,
    /// File name, present exactly when content is
    pub filename: Option<String>,
    /// Event or superevent receiving the upload
    pub target_id: String,
    /// Free-text (markup allowed) log message
    pub message: String,
    pub tags: Vec<Tag>,
}

impl Upload {
    /// A log message with no attached file
    pub fn message(target_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            content: None,
            filename: None,
            target_id: target_id.into(),
            message: message.into(),
            tags: Vec::new(),
        }
    }

    /// A log message with an attached file
    pub fn file(
        target_id: impl Into<String>,
        filename: impl Into<String>,
        content: Vec<u8>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            content: Some(content),
            filename: Some(filename.into()),
            target_id: target_id.into(),
            message: message.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Tag names as sent on the wire
    pub fn tag_names(&self) -> Vec<&'static str> {
        self.tags.iter().map(Tag::as_str).collect()
    }
}
