//! CLI help specs
//!
//! Verify the command surface is discoverable.

use crate::prelude::*;

#[test]
fn help_lists_every_command() {
    let temp = Project::empty();
    let out = temp.gwf().args(&["--help"]).passes();
    for command in ["run", "render", "harvest", "status", "mock-bursts", "completions"] {
        assert!(out.stdout.contains(command), "missing {command}:\n{}", out.stdout);
    }
}

#[test]
fn run_help_names_both_ids() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("<EVENT_ID>")
        .stdout_has("<SUPEREVENT_ID>");
}

#[test]
fn completions_generate_for_bash() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("_gwf");
}

#[test]
fn completions_generate_for_zsh() {
    assert_cmd::Command::cargo_bin("gwf")
        .unwrap()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicates::str::contains("#compdef gwf"));
}

#[test]
fn version_flag_prints_version() {
    assert_cmd::Command::cargo_bin("gwf")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::starts_with("gwf "));
}
