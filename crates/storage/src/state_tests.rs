// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;

fn start(run: &str, event: &str, at: DateTime<Utc>) -> Operation {
    Operation::RunStarted {
        run_id: RunId::from(run),
        event_id: event.to_string(),
        superevent_id: "S1".to_string(),
        at,
    }
}

fn change(run: &str, phase: Phase, reason: Option<&str>) -> Operation {
    Operation::PhaseChanged {
        run_id: RunId::from(run),
        phase,
        reason: reason.map(String::from),
        at: Utc::now(),
    }
}

#[test]
fn latest_phase_wins() {
    let ops = vec![
        start("run-1", "G1", Utc::now()),
        change("run-1", Phase::Configured, None),
        change("run-1", Phase::Launched, None),
    ];

    let state = MaterializedState::from_operations(&ops);
    assert_eq!(state.runs[&RunId::from("run-1")].phase, Phase::Launched);
}

#[test]
fn change_for_unknown_run_is_ignored() {
    let state = MaterializedState::from_operations(&[change("ghost", Phase::Failed, None)]);
    assert!(state.runs.is_empty());
}

#[test]
fn halt_reason_is_kept() {
    let ops = vec![
        start("run-1", "G1", Utc::now()),
        change("run-1", Phase::Halted, Some("generator exited with 2")),
    ];

    let state = MaterializedState::from_operations(&ops);
    let run = state.get_run("run-1").unwrap();
    assert_eq!(run.reason.as_deref(), Some("generator exited with 2"));
    assert!(run.to_string().contains("generator exited with 2"));
}

#[test]
fn get_run_by_unique_prefix() {
    let ops = vec![
        start("abc-123", "G1", Utc::now()),
        start("abd-456", "G2", Utc::now()),
    ];
    let state = MaterializedState::from_operations(&ops);

    assert_eq!(state.get_run("abc").unwrap().event_id, "G1");
    assert!(state.get_run("ab").is_none());
}

#[test]
fn runs_for_event_are_oldest_first() {
    let now = Utc::now();
    let ops = vec![
        start("run-b", "G1", now),
        start("run-a", "G1", now - Duration::minutes(5)),
        start("run-c", "G2", now),
    ];
    let state = MaterializedState::from_operations(&ops);

    let runs: Vec<_> = state
        .runs_for_event("G1")
        .iter()
        .map(|r| r.run_id.0.clone())
        .collect();
    assert_eq!(runs, vec!["run-a", "run-b"]);
}
