//! Behavioral specifications for the gwf CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes. None of them reach a real tracking
//! system or batch scheduler.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// status/
#[path = "specs/status/list.rs"]
mod status_list;

// workflow/
#[path = "specs/workflow/halt.rs"]
mod workflow_halt;
#[path = "specs/workflow/mock_bursts.rs"]
mod workflow_mock_bursts;
