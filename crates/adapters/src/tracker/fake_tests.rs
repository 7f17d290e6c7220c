// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[tokio::test]
async fn unknown_event_is_not_found() {
    let tracker = FakeTracker::new();
    let err = tracker.get_event("G404").await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(id) if id == "G404"));
}

#[tokio::test]
async fn registered_event_is_returned() {
    let tracker = FakeTracker::new();
    tracker.add_event("G1", json!({"graceid": "G1"}));

    let event = tracker.get_event("G1").await.unwrap();
    assert_eq!(event["graceid"], "G1");
    assert_eq!(
        tracker.calls(),
        vec![TrackerCall::GetEvent {
            graceid: "G1".to_string()
        }]
    );
}

#[tokio::test]
async fn uploads_are_recorded_in_order() {
    let tracker = FakeTracker::new();
    tracker.upload(&Upload::message("S1", "first")).await.unwrap();
    tracker.upload(&Upload::message("G1", "second")).await.unwrap();

    assert_eq!(tracker.messages(), vec!["first", "second"]);
    assert_eq!(tracker.uploads()[1].target_id, "G1");
}

#[tokio::test]
async fn injected_upload_failure_is_still_recorded() {
    let tracker = FakeTracker::new();
    tracker.fail_uploads_containing("finished");

    assert!(tracker.upload(&Upload::message("S1", "started")).await.is_ok());
    assert!(tracker
        .upload(&Upload::message("S1", "analysis finished."))
        .await
        .is_err());
    assert_eq!(tracker.uploads().len(), 2);
}

#[tokio::test]
async fn created_events_get_sequential_ids() {
    let tracker = FakeTracker::new();
    let event = NewEvent {
        filecontents: b"{}".to_vec(),
        search: "MDC".to_string(),
        pipeline: "oLIB".to_string(),
        group: "Test".to_string(),
    };
    assert_eq!(tracker.create_event(&event).await.unwrap(), "M1");
    assert_eq!(tracker.create_event(&event).await.unwrap(), "M2");
}

#[tokio::test]
async fn superevent_query_returns_configured_list() {
    let tracker = FakeTracker::new();
    tracker.set_superevents(vec![json!({"superevent_id": "MS1"})]);

    let found = tracker.get_superevents("Test event: M1").await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(tracker.calls().contains(&TrackerCall::GetSuperevents {
        query: "Test event: M1".to_string()
    }));
}
