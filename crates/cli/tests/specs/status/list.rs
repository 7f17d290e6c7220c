//! Status specs
//!
//! Verify `gwf status` reports the latest phase of each journaled run.

use crate::prelude::*;

fn journal(temp: &Project, lines: &[String]) {
    temp.file("jobs/journal.jsonl", &(lines.join("\n") + "\n"));
}

#[test]
fn empty_journal_has_no_runs() {
    let temp = Project::empty();
    temp.gwf().args(&["status"]).passes().stdout_has("No runs");
}

#[test]
fn empty_journal_as_json_is_empty_list() {
    let temp = Project::empty();
    let out = temp.gwf().args(&["status", "--format", "json"]).passes();
    let runs: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
    similar_asserts::assert_eq!(runs, serde_json::json!([]));
}

#[test]
fn shows_latest_phase_per_run() {
    let temp = Project::empty();
    journal(
        &temp,
        &[
            run_started(1, "run-a", "G1", "2026-01-01T00:00:00Z"),
            phase_changed(2, "run-a", "configured", "2026-01-01T00:00:01Z"),
            phase_changed(3, "run-a", "launched", "2026-01-01T00:00:02Z"),
            run_started(4, "run-b", "G2", "2026-01-01T00:01:00Z"),
            phase_changed(5, "run-b", "halted", "2026-01-01T00:01:01Z"),
        ],
    );

    temp.gwf()
        .args(&["status"])
        .passes()
        .stdout_has("PHASE")
        .stdout_has("run-a")
        .stdout_has("launched")
        .stdout_has("halted")
        .stdout_lacks("configured");
}

#[test]
fn filters_by_event() {
    let temp = Project::empty();
    journal(
        &temp,
        &[
            run_started(1, "run-a", "G1", "2026-01-01T00:00:00Z"),
            run_started(2, "run-b", "G2", "2026-01-01T00:01:00Z"),
        ],
    );

    temp.gwf()
        .args(&["status", "--event", "G2"])
        .passes()
        .stdout_has("run-b")
        .stdout_lacks("run-a");
}

#[test]
fn json_output_carries_phase() {
    let temp = Project::empty();
    journal(
        &temp,
        &[
            run_started(1, "run-a", "G1", "2026-01-01T00:00:00Z"),
            phase_changed(2, "run-a", "configured", "2026-01-01T00:00:01Z"),
        ],
    );

    let out = temp.gwf().args(&["status", "--format", "json"]).passes();
    let runs: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(runs[0]["run_id"], "run-a");
    assert_eq!(runs[0]["phase"], "configured");
    assert_eq!(runs[0]["event_id"], "G1");
}

#[test]
fn selects_run_by_prefix() {
    let temp = Project::empty();
    journal(
        &temp,
        &[
            run_started(1, "run-abc", "G1", "2026-01-01T00:00:00Z"),
            run_started(2, "run-xyz", "G1", "2026-01-01T00:01:00Z"),
        ],
    );

    temp.gwf()
        .args(&["status", "--run", "run-x"])
        .passes()
        .stdout_has("run-xyz")
        .stdout_lacks("run-abc");
}

#[test]
fn ambiguous_run_prefix_fails() {
    let temp = Project::empty();
    journal(
        &temp,
        &[
            run_started(1, "run-abc", "G1", "2026-01-01T00:00:00Z"),
            run_started(2, "run-xyz", "G1", "2026-01-01T00:01:00Z"),
        ],
    );

    temp.gwf()
        .args(&["status", "--run", "run-"])
        .fails()
        .stderr_has("no run matches run-");
}
