// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gwf_adapters::FakeTracker;

#[tokio::test]
async fn failure_messages_differ_by_kind() {
    let tracker = FakeTracker::new();
    let reporter = Reporter::new(tracker.clone());

    reporter.aborted("S1").await.unwrap();
    reporter.failed("S1").await.unwrap();

    let messages = tracker.messages();
    assert_eq!(messages, vec![JOB_ABORTED, JOB_FAILED]);
    assert_ne!(messages[0], messages[1]);
    assert!(tracker.uploads().iter().all(|u| u.target_id == "S1"));
}

#[tokio::test]
async fn generation_log_carries_args_and_output() {
    let tracker = FakeTracker::new();
    let reporter = Reporter::new(tracker.clone());
    let output = ProcessOutput {
        args: vec!["bayeswave_pipe".to_string(), "a.ini".to_string()],
        code: Some(1),
        stdout: "out".to_string(),
        stderr: "err".to_string(),
    };

    reporter.generation_failed("S1", &output).await.unwrap();

    let uploads = tracker.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].filename.as_deref(), Some(GENERATION_LOG));
    assert_eq!(uploads[0].message, GENERATION_FAILED);
    assert_eq!(uploads[0].tag_names(), vec!["pe"]);

    let payload: serde_json::Value =
        serde_json::from_slice(uploads[0].content.as_deref().unwrap()).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({
            "args": ["bayeswave_pipe", "a.ini"],
            "stdout": "out",
            "stderr": "err"
        })
    );
}

#[tokio::test]
async fn skymap_is_tagged_for_localization() {
    let tracker = FakeTracker::new();
    let reporter = Reporter::new(tracker.clone());

    reporter
        .skymap("G1", "bayeswave.fits.gz", vec![0x1f, 0x8b])
        .await
        .unwrap();

    let upload = &tracker.uploads()[0];
    assert_eq!(upload.target_id, "G1");
    assert_eq!(upload.message, SKYMAP_MESSAGE);
    assert_eq!(upload.tag_names(), vec!["sky_loc", "pe"]);
}

#[tokio::test]
async fn report_link_embeds_url() {
    let tracker = FakeTracker::new();
    Reporter::new(tracker.clone())
        .report_link("G1", "https://example.org/G1/")
        .await
        .unwrap();

    assert_eq!(
        tracker.messages(),
        vec!["BayesWave <a href=\"https://example.org/G1/\">full report</a>"]
    );
}

#[tokio::test]
async fn launch_announcement_names_event() {
    let tracker = FakeTracker::new();
    Reporter::new(tracker.clone())
        .launched("S1", "G1")
        .await
        .unwrap();
    assert_eq!(tracker.messages(), vec!["BayesWave launched for G1."]);
}
