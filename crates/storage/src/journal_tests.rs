// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn started(run: &str) -> Operation {
    Operation::RunStarted {
        run_id: RunId::from(run),
        event_id: "G1".to_string(),
        superevent_id: "S1".to_string(),
        at: Utc::now(),
    }
}

#[test]
fn journal_replays_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    {
        let mut journal = Journal::open(&path).unwrap();
        journal.append(&started("run-1")).unwrap();
        journal
            .append(&Operation::PhaseChanged {
                run_id: RunId::from("run-1"),
                phase: Phase::Configured,
                reason: None,
                at: Utc::now(),
            })
            .unwrap();
    }

    let ops = Journal::replay(&path).unwrap();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], Operation::RunStarted { .. }));
    assert!(matches!(
        ops[1],
        Operation::PhaseChanged {
            phase: Phase::Configured,
            ..
        }
    ));
}

#[test]
fn sequence_continues_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    {
        let mut journal = Journal::open(&path).unwrap();
        assert_eq!(journal.sequence(), 0);
        assert_eq!(journal.append(&started("run-1")).unwrap(), 1);
    }

    let journal = Journal::open(&path).unwrap();
    assert_eq!(journal.sequence(), 1);
}

#[test]
fn open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs").join("journal.jsonl");

    Journal::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn replay_of_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let ops = Journal::replay(&dir.path().join("absent.jsonl")).unwrap();
    assert!(ops.is_empty());
}

#[test]
fn corrupt_line_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");
    std::fs::write(&path, "{not json}\n").unwrap();

    assert!(matches!(Journal::replay(&path), Err(JournalError::Json(_))));
}

#[test]
fn halt_reason_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    let mut journal = Journal::open(&path).unwrap();
    journal
        .append(&Operation::PhaseChanged {
            run_id: RunId::from("run-1"),
            phase: Phase::Halted,
            reason: Some("missing artifact".to_string()),
            at: Utc::now(),
        })
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"op\":\"phase_changed\""));
    assert!(text.contains("\"phase\":\"halted\""));
    assert!(text.contains("missing artifact"));
}
