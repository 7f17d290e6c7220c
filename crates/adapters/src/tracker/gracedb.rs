// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GraceDB REST client

use super::{NewEvent, Signoff, TrackerAdapter, TrackerError};
use async_trait::async_trait;
use gwf_core::{TrackerSettings, Upload};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};

/// Tracking-system client speaking the GraceDB REST API
#[derive(Clone)]
pub struct GraceDbTracker {
    client: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl GraceDbTracker {
    pub fn new(settings: &TrackerSettings) -> Result<Self, TrackerError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TrackerError::Transport(format!("cannot build HTTP client: {}", e)))?;
        let mut base = settings.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client,
            base,
            token: settings.token.clone(),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Superevent ids: `S190425z`, and the `MS`/`TS`/`GS` prefixes of mock,
/// test, and grouped superevents
pub(crate) fn is_superevent_id(id: &str) -> bool {
    id.starts_with('S') || ["MS", "TS", "GS"].iter().any(|p| id.starts_with(p))
}

pub(crate) fn log_url(base: &str, target_id: &str) -> String {
    if is_superevent_id(target_id) {
        format!("{}superevents/{}/logs/", base, target_id)
    } else {
        format!("{}events/{}/log/", base, target_id)
    }
}

pub(crate) fn upload_form(upload: &Upload) -> Form {
    let mut form = Form::new().text("comment", upload.message.clone());
    for tag in upload.tag_names() {
        form = form.text("tagname", tag);
    }
    if let (Some(filename), Some(content)) = (&upload.filename, &upload.content) {
        form = form.part(
            "upload",
            Part::bytes(content.clone()).file_name(filename.clone()),
        );
    }
    form
}

/// Send a request, mapping transport failures and error statuses
async fn send(url: &str, request: RequestBuilder) -> Result<Response, TrackerError> {
    let response = request
        .send()
        .await
        .map_err(|e| TrackerError::Transport(e.to_string()))?;
    match response.status() {
        StatusCode::NOT_FOUND => Err(TrackerError::NotFound(url.to_string())),
        status if !status.is_success() => Err(TrackerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        }),
        _ => Ok(response),
    }
}

async fn read_json(url: &str, response: Response) -> Result<serde_json::Value, TrackerError> {
    response
        .json()
        .await
        .map_err(|e| TrackerError::InvalidResponse(format!("{}: {}", url, e)))
}

#[async_trait]
impl TrackerAdapter for GraceDbTracker {
    async fn get_event(&self, graceid: &str) -> Result<serde_json::Value, TrackerError> {
        let url = format!("{}events/{}", self.base, graceid);
        let response = send(&url, self.request(Method::GET, &url)).await?;
        read_json(&url, response).await
    }

    async fn upload(&self, upload: &Upload) -> Result<(), TrackerError> {
        let url = log_url(&self.base, &upload.target_id);
        let request = self
            .request(Method::POST, &url)
            .multipart(upload_form(upload));
        send(&url, request).await?;
        Ok(())
    }

    async fn get_superevents(&self, query: &str) -> Result<Vec<serde_json::Value>, TrackerError> {
        let url = format!("{}superevents/", self.base);
        let request = self.request(Method::GET, &url).query(&[("query", query)]);
        let json = read_json(&url, send(&url, request).await?).await?;
        json.get("superevents")
            .and_then(|v| v.as_array())
            .cloned()
            .ok_or_else(|| TrackerError::InvalidResponse(format!("{}: missing superevents list", url)))
    }

    async fn create_event(&self, event: &NewEvent) -> Result<String, TrackerError> {
        let url = format!("{}events/", self.base);
        let form = Form::new()
            .text("group", event.group.clone())
            .text("pipeline", event.pipeline.clone())
            .text("search", event.search.clone())
            .part(
                "eventFile",
                Part::bytes(event.filecontents.clone()).file_name("initial.data"),
            );
        let request = self.request(Method::POST, &url).multipart(form);
        let json = read_json(&url, send(&url, request).await?).await?;
        json.get("graceid")
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| TrackerError::InvalidResponse(format!("{}: missing graceid", url)))
    }

    async fn create_signoff(&self, signoff: &Signoff) -> Result<(), TrackerError> {
        let url = format!(
            "{}superevents/{}/signoffs/",
            self.base, signoff.superevent_id
        );
        let request = self.request(Method::POST, &url).json(&serde_json::json!({
            "signoff_type": signoff.signoff_type,
            "status": signoff.status.as_str(),
            "comment": signoff.comment,
        }));
        send(&url, request).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "gracedb_tests.rs"]
mod tests;
