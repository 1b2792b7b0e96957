// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end tests for the exec and ssh entry points.
//!
//! Interactive sessions inherit the test's stdio, so the stand-in client
//! only records its arguments to a file and exits.

#![cfg(unix)]

use fanssh::commands::exec::{execute_command, ExecuteCommandParams};
use fanssh::commands::ssh::ssh_command_with;
use fanssh::executor::{ExitCodeStrategy, SshClientConfig};
use fanssh::{ExecError, Target};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Client that writes one argument per line to `args.txt` and exits with `code`.
fn recording_client(dir: &Path, code: i32) -> (SshClientConfig, PathBuf) {
    let record = dir.join("args.txt");
    let script = dir.join("record-ssh.sh");
    let body = format!(
        "printf '%s\\n' \"$@\" > '{}'\nexit {code}\n",
        record.display()
    );
    std::fs::write(&script, body).unwrap();

    let client = SshClientConfig {
        program: "/bin/sh".to_string(),
        options: vec![script.to_string_lossy().to_string()],
        batch_tty: false,
    };
    (client, record)
}

fn recorded_args(record: &Path) -> Vec<String> {
    std::fs::read_to_string(record)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_no_targets_starts_no_session() {
    let dir = TempDir::new().unwrap();
    let (client, record) = recording_client(dir.path(), 0);

    let err = execute_command(ExecuteCommandParams {
        targets: Vec::new(),
        command: "uptime",
        concurrency: 2,
        client: &client,
        exit_strategy: ExitCodeStrategy::default(),
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExecError>(),
        Some(ExecError::NoTargets)
    ));
    assert!(!record.exists());
}

#[tokio::test]
async fn test_zero_concurrency_is_rejected() {
    let client = SshClientConfig::default();

    let err = execute_command(ExecuteCommandParams {
        targets: vec![Target::new("10.0.0.1")],
        command: "uptime",
        concurrency: 0,
        client: &client,
        exit_strategy: ExitCodeStrategy::default(),
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExecError>(),
        Some(ExecError::InvalidConcurrency(0))
    ));
}

#[tokio::test]
async fn test_single_target_without_command_attaches() {
    let dir = TempDir::new().unwrap();
    let (client, record) = recording_client(dir.path(), 0);

    let code = execute_command(ExecuteCommandParams {
        targets: vec![Target::new("10.0.0.7")],
        command: "   ",
        concurrency: 2,
        client: &client,
        exit_strategy: ExitCodeStrategy::default(),
    })
    .await
    .unwrap();

    assert_eq!(code, 0);
    // No remote command: a plain login shell
    assert_eq!(recorded_args(&record), vec!["-t", "10.0.0.7"]);
}

#[tokio::test]
async fn test_interactive_exit_code_is_returned() {
    let dir = TempDir::new().unwrap();
    let (client, _record) = recording_client(dir.path(), 5);

    let code = execute_command(ExecuteCommandParams {
        targets: vec![Target::new("10.0.0.7")],
        command: "",
        concurrency: 2,
        client: &client,
        exit_strategy: ExitCodeStrategy::RequireAllSuccess,
    })
    .await
    .unwrap();

    assert_eq!(code, 5);
}

#[tokio::test]
async fn test_selected_target_runs_attach_command() {
    let dir = TempDir::new().unwrap();
    let (client, record) = recording_client(dir.path(), 0);
    let targets = vec![
        Target::new("10.0.0.1").with_name("web-1"),
        Target::new("10.0.0.2").with_name("web-2"),
    ];
    let mut prompt = Vec::new();

    let code = ssh_command_with(
        &targets,
        "tail -f '/var/log/app log'",
        &client,
        Cursor::new("2\n"),
        &mut prompt,
    )
    .await
    .unwrap();

    assert_eq!(code, 0);
    let args = recorded_args(&record);
    assert_eq!(args[..2], ["-t", "10.0.0.2"]);

    // The attach command survives one round of shell parsing intact
    let words = shell_words::split(&args[2]).unwrap();
    assert_eq!(
        words,
        vec!["exec", "$SHELL", "-l", "-c", "tail -f '/var/log/app log'"]
    );

    let prompt = String::from_utf8(prompt).unwrap();
    assert!(prompt.contains("Multiple targets found:"));
    assert!(prompt.contains("web-2"));
}

#[tokio::test]
async fn test_aborted_selection_starts_no_session() {
    let dir = TempDir::new().unwrap();
    let (client, record) = recording_client(dir.path(), 0);
    let targets = vec![Target::new("10.0.0.1"), Target::new("10.0.0.2")];

    let err = ssh_command_with(&targets, "", &client, Cursor::new(""), Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ExecError>(),
        Some(ExecError::SelectionAborted)
    ));
    assert!(!record.exists());
}

#[tokio::test]
async fn test_attach_ignores_batch_concurrency() {
    let dir = TempDir::new().unwrap();
    let (client, record) = recording_client(dir.path(), 0);

    let code = execute_command(ExecuteCommandParams {
        targets: vec![Target::new("10.0.0.7")],
        command: "",
        concurrency: 0,
        client: &client,
        exit_strategy: ExitCodeStrategy::default(),
    })
    .await
    .unwrap();

    assert_eq!(code, 0);
    assert_eq!(recorded_args(&record), vec!["-t", "10.0.0.7"]);
}
