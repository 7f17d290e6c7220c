// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

fn invocation(work_dir: &Path) -> PipeInvocation {
    PipeInvocation {
        config: work_dir.join("bw.ini"),
        work_dir: work_dir.to_path_buf(),
        event_id: "G1".to_string(),
        niter: None,
    }
}

#[test]
fn plain_command_line_starts_with_executable() {
    let pipe = BayesWavePipe::new(PathBuf::from("/opt/bw/bayeswave_pipe"), None);
    let line = pipe.command_line(&invocation(Path::new("/jobs/G1")));
    assert_eq!(line[0], "/opt/bw/bayeswave_pipe");
    assert_eq!(line[1], "/jobs/G1/bw.ini");
}

#[test]
fn env_file_wraps_command_in_shell() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("env.sh");
    std::fs::write(&env_file, "").unwrap();

    let pipe = BayesWavePipe::new(PathBuf::from("bayeswave_pipe"), Some(env_file.clone()));
    let line = pipe.command_line(&invocation(Path::new("/jobs/G1")));
    assert_eq!(
        &line[..5],
        &[
            "sh".to_string(),
            "-c".to_string(),
            ENV_WRAPPER.to_string(),
            env_file.display().to_string(),
            "bayeswave_pipe".to_string(),
        ]
    );
    assert!(line.contains(&"--graceID".to_string()));
}

#[test]
fn absent_env_file_is_skipped() {
    let pipe = BayesWavePipe::new(
        PathBuf::from("/opt/bw/bayeswave_pipe"),
        Some(PathBuf::from("/nonexistent/bayeswave-user-env.sh")),
    );
    let line = pipe.command_line(&invocation(Path::new("/jobs/G1")));
    assert_eq!(line[0], "/opt/bw/bayeswave_pipe");
    assert!(!line.iter().any(|arg| arg.contains("bayeswave-user-env")));
}

#[cfg(unix)]
#[tokio::test]
async fn captures_exit_code_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake_pipe.sh");
    std::fs::write(&script, "echo \"args: $*\"\necho oops >&2\nexit 3\n").unwrap();

    let env_file = dir.path().join("env.sh");
    std::fs::write(&env_file, "").unwrap();

    // Run the script through sh so no exec bit is needed
    let pipe = BayesWavePipe::new(PathBuf::from("sh"), Some(env_file));
    let mut inv = invocation(dir.path());
    inv.config = script;

    let out = pipe.generate(&inv).await.unwrap();
    assert_eq!(out.code, Some(3));
    assert!(!out.success());
    assert!(out.stdout.contains("--graceID G1"));
    assert_eq!(out.stderr.trim(), "oops");
    assert_eq!(out.args[0], "sh");
}

#[tokio::test]
async fn missing_executable_is_spawn_error() {
    let pipe = BayesWavePipe::new(PathBuf::from("/nonexistent/bayeswave_pipe"), None);
    let err = pipe
        .generate(&invocation(Path::new("/tmp")))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Spawn { .. }));
}
