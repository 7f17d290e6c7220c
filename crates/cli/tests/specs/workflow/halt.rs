//! Workflow halt specs
//!
//! A run that cannot reach the tracking system halts before launching
//! anything and leaves a journal record behind.

use crate::prelude::*;

#[test]
fn run_without_tracker_is_journaled_as_halted() {
    let temp = Project::empty();

    temp.gwf()
        .args(&["run", "G330564", "S190425z"])
        .fails()
        .stderr_has("error:");

    assert!(!temp.path().join("jobs/G330564").exists());
    temp.gwf()
        .args(&["status", "--event", "G330564"])
        .passes()
        .stdout_has("S190425z")
        .stdout_has("halted");
}

#[test]
fn lock_file_is_left_for_reuse() {
    let temp = Project::empty();
    temp.gwf().args(&["run", "G1", "S1"]).fails();
    assert!(temp.path().join("jobs/.locks/G1.lock").exists());

    // The lock is released when the process exits
    temp.gwf().args(&["run", "G1", "S1"]).fails().stderr_has("error:");
    let out = temp.gwf().args(&["status", "--event", "G1"]).passes();
    assert_eq!(out.stdout.matches("halted").count(), 2);
}

#[test]
fn log_file_receives_failure() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["--log-file", "logs/gwf.log", "run", "G1", "S1"])
        .fails();

    let log = std::fs::read_to_string(temp.path().join("logs/gwf.log")).unwrap();
    assert!(log.contains("run failed"), "log:\n{log}");
    assert!(log.contains("G1"));
}
