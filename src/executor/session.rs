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

//! Remote sessions backed by the system ssh client.
//!
//! A batch session runs the client with captured pipes and forwards both
//! streams through [`PrefixWriter`]s. An interactive session hands the
//! operator's terminal to the client and reports its exit status.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::io::{self, AsyncRead};
use tokio::process::{Child, Command};

use crate::error::ExecError;
use crate::target::Target;

use super::output_sync::ConsoleSinks;
use super::prefix::PrefixWriter;

/// How to launch the remote-shell client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshClientConfig {
    /// Program to run, resolved through `PATH`
    pub program: String,
    /// Extra arguments placed before the target
    pub options: Vec<String>,
    /// Force pty allocation (`-tt`) for batch sessions
    pub batch_tty: bool,
}

impl Default for SshClientConfig {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            options: Vec::new(),
            batch_tty: false,
        }
    }
}

impl SshClientConfig {
    /// Arguments for running `command` on `target` without a terminal.
    pub fn batch_args(&self, target: &Target, command: &str) -> Vec<String> {
        let mut args = self.options.clone();
        if self.batch_tty {
            args.push("-tt".to_string());
        }
        args.push(target.address.clone());
        args.push(command.to_string());
        args
    }

    /// Arguments for an attached session, optionally running `attach` in a
    /// login shell on the remote side.
    pub fn interactive_args(&self, target: &Target, attach: Option<&str>) -> Vec<String> {
        let mut args = self.options.clone();
        args.push("-t".to_string());
        args.push(target.address.clone());
        if let Some(command) = attach.filter(|c| !c.trim().is_empty()) {
            args.push(attach_command(command));
        }
        args
    }
}

/// Remote command that runs `command` in the user's login shell.
///
/// `command` is quoted as a single shell word, so quotes inside it cannot
/// terminate the `-c` argument early.
pub fn attach_command(command: &str) -> String {
    format!("exec $SHELL -l -c {}", shell_words::quote(command))
}

/// Runs one batch session against one target.
#[async_trait]
pub trait SessionRunner: Send + Sync + 'static {
    /// Run `command` on `target` until the remote side exits and all of its
    /// output has been forwarded.
    async fn run(&self, target: &Target, command: &str) -> Result<(), ExecError>;
}

/// [`SessionRunner`] that spawns the ssh client and labels its output.
pub struct SshRunner {
    client: SshClientConfig,
    console: ConsoleSinks,
}

impl SshRunner {
    pub fn new(client: SshClientConfig, console: ConsoleSinks) -> Self {
        Self { client, console }
    }
}

#[async_trait]
impl SessionRunner for SshRunner {
    async fn run(&self, target: &Target, command: &str) -> Result<(), ExecError> {
        let session = Session::spawn(&self.client, target, command)?;
        session.finish(&self.console).await
    }
}

/// A running ssh client process and its two output pipes.
///
/// Owned by the task driving the target and consumed by [`Session::finish`].
pub struct Session {
    target: Target,
    child: Child,
}

impl Session {
    /// Validate `target` and launch the client with captured output.
    pub fn spawn(
        client: &SshClientConfig,
        target: &Target,
        command: &str,
    ) -> Result<Self, ExecError> {
        target.validate()?;

        let child = Command::new(&client.program)
            .args(client.batch_args(target, command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::ProcessSpawnFailure {
                target: target.address.clone(),
                program: client.program.clone(),
                source,
            })?;

        tracing::debug!("Started session for {} (pid {:?})", target.address, child.id());

        Ok(Self {
            target: target.clone(),
            child,
        })
    }

    /// Forward both output streams and wait for the client to exit.
    ///
    /// The two drains and the wait run concurrently; the session is done only
    /// when all three have completed.
    pub async fn finish(mut self, console: &ConsoleSinks) -> Result<(), ExecError> {
        let address = self.target.address.clone();
        let stdout_writer =
            PrefixWriter::for_host(&address, console.stdout.clone(), console.use_colors);
        let stderr_writer =
            PrefixWriter::for_host(&address, console.stderr.clone(), console.use_colors);

        let stdout = self.child.stdout.take();
        let stderr = self.child.stderr.take();

        let (stdout_result, stderr_result, status) = tokio::join!(
            drain(&stdout_writer, stdout),
            drain(&stderr_writer, stderr),
            self.child.wait(),
        );

        let io_error = |source| ExecError::SessionIo {
            target: address.clone(),
            source,
        };
        let status = status.map_err(io_error)?;
        let stdout_lines = stdout_result.map_err(io_error)?;
        let stderr_lines = stderr_result.map_err(io_error)?;

        tracing::debug!(
            "Session for {} finished with {} ({} stdout lines, {} stderr lines)",
            address,
            status,
            stdout_lines,
            stderr_lines
        );

        check_status(&address, status)
    }
}

async fn drain<R>(writer: &PrefixWriter, reader: Option<R>) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(reader) => writer.copy_from(reader).await,
        None => Ok(0),
    }
}

fn check_status(address: &str, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::RemoteCommandFailure {
            target: address.to_string(),
            code: status.code(),
        })
    }
}

/// Attach the operator's terminal to an ssh session on `target`.
///
/// Returns the client's exit status as a process exit code. A client killed
/// by a signal maps to `128 + signal` on Unix.
pub async fn run_interactive(
    client: &SshClientConfig,
    target: &Target,
    attach: Option<&str>,
) -> Result<i32, ExecError> {
    target.validate()?;

    tracing::debug!("Attaching to {}", target.address);

    let status = Command::new(&client.program)
        .args(client.interactive_args(target, attach))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| ExecError::ProcessSpawnFailure {
            target: target.address.clone(),
            program: client.program.clone(),
            source,
        })?;

    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
