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

//! Shared console destinations for multi-host output.
//!
//! Every session writes through the same pair of destinations. Each
//! destination sits behind an async mutex so a labeled line is written and
//! flushed as a unit, never interleaved with another host's bytes.

use std::sync::Arc;
use tokio::io::{self, AsyncWrite};
use tokio::sync::Mutex;

/// A destination shared by all sessions of a batch.
pub type SharedSink = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

/// Wrap a writer so it can be shared between sessions.
pub fn shared_sink<W>(writer: W) -> SharedSink
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Standard output and standard error destinations for a batch run.
#[derive(Clone)]
pub struct ConsoleSinks {
    pub stdout: SharedSink,
    pub stderr: SharedSink,
    pub use_colors: bool,
}

impl ConsoleSinks {
    pub fn new(stdout: SharedSink, stderr: SharedSink, use_colors: bool) -> Self {
        Self {
            stdout,
            stderr,
            use_colors,
        }
    }

    /// Destinations bound to this process's stdout and stderr.
    pub fn process() -> Self {
        Self::new(
            shared_sink(io::stdout()),
            shared_sink(io::stderr()),
            should_use_colors(),
        )
    }
}

/// Check if stdout is a TTY
///
/// Piped or redirected output and CI environments count as non-interactive.
pub fn is_tty() -> bool {
    use std::io::IsTerminal;

    let is_terminal = std::io::stdout().is_terminal();

    let is_ci = std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok();

    is_terminal && !is_ci
}

/// Check if colors should be enabled
///
/// Colors are enabled when:
/// - Output is a TTY
/// - NO_COLOR environment variable is not set
/// - TERM is not "dumb"
pub fn should_use_colors() -> bool {
    if !is_tty() {
        return false;
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
