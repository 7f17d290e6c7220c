//! CLI error specs
//!
//! Verify bad input fails with a readable message.

use crate::prelude::*;

#[test]
fn run_requires_superevent() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["run", "G330564"])
        .fails()
        .stderr_has("SUPEREVENT_ID");
}

#[test]
fn unknown_command_fails() {
    let temp = Project::empty();
    temp.gwf().args(&["launch"]).fails();
}

#[test]
fn invalid_settings_file_suggests_fix() {
    let temp = Project::empty();
    temp.file("gwf.toml", "[pipeline\nniter = ");
    temp.gwf()
        .args(&["status"])
        .fails()
        .stderr_has("invalid settings")
        .stderr_has("GWF_CONFIG");
}

#[test]
fn unreachable_tracker_fails_render() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["render", "G330564"])
        .fails()
        .stderr_has("error:");
    assert!(!temp.path().join("configs/bayes_wave_zero_lag_G330564.ini").exists());
}

#[test]
fn path_like_event_id_is_refused() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["run", "../escape", "S1"])
        .fails()
        .stderr_has("invalid event id");
    assert!(!temp.path().join("jobs/escape.lock").exists());
    assert!(!temp.path().join("escape.lock").exists());
}
