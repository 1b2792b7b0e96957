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

//! Error types for the fan-out engine.

use thiserror::Error;

/// Errors produced while resolving, validating, or running remote sessions.
///
/// Per-session variants (`InvalidTarget`, `ProcessSpawnFailure`,
/// `RemoteCommandFailure`, `SessionIo`, `TaskFailed`) are recorded in the
/// outcome of the target they belong to and never abort sibling sessions.
/// `NoTargets` and `InvalidConcurrency` abort the invocation before any
/// subprocess is spawned.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Empty or malformed address, rejected before spawning
    #[error("invalid target '{target}': {reason}")]
    InvalidTarget {
        target: String,
        reason: &'static str,
    },

    /// The remote-shell client could not be launched
    #[error("failed to launch '{program}' for {target}: {source}")]
    ProcessSpawnFailure {
        target: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The remote command exited non-zero, or the client was killed by a signal
    #[error("{target}: {}", describe_exit(.code))]
    RemoteCommandFailure { target: String, code: Option<i32> },

    /// Waiting on the client, reading its pipes, or writing to the console failed
    #[error("{target}: session I/O failed: {source}")]
    SessionIo {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// The session task died before producing an outcome
    #[error("{target}: session task failed: {reason}")]
    TaskFailed { target: String, reason: String },

    /// The resolved candidate set is empty
    #[error("no targets found")]
    NoTargets,

    /// A pool must hold at least one token
    #[error("concurrency must be at least 1 (got {0})")]
    InvalidConcurrency(usize),

    /// Standard input closed before a target was selected
    #[error("no target selected: input closed")]
    SelectionAborted,

    /// Reading the selection or writing the selection table failed
    #[error("selection prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

impl ExecError {
    /// Target the error belongs to, when it is a per-session error.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::InvalidTarget { target, .. }
            | Self::ProcessSpawnFailure { target, .. }
            | Self::RemoteCommandFailure { target, .. }
            | Self::SessionIo { target, .. }
            | Self::TaskFailed { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Exit code to report for this error.
    ///
    /// Remote failures keep the remote exit code; everything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RemoteCommandFailure {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("remote command exited with status {code}"),
        None => "remote command terminated by signal".to_string(),
    }
}
