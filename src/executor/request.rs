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

//! The unit of work handed to the dispatcher.

use crate::error::ExecError;
use crate::target::Target;

/// Pool size used when neither the command line nor the config sets one.
pub const DEFAULT_CONCURRENCY: usize = 2;

/// One command fanned out to an ordered list of targets.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    targets: Vec<Target>,
    command: String,
    concurrency: usize,
}

impl ExecutionRequest {
    /// Build a request. Fails if `concurrency` is zero.
    ///
    /// An empty target list is accepted here and reported as `NoTargets` by
    /// whichever path consumes the request.
    pub fn new(
        targets: Vec<Target>,
        command: impl Into<String>,
        concurrency: usize,
    ) -> Result<Self, ExecError> {
        if concurrency == 0 {
            return Err(ExecError::InvalidConcurrency(concurrency));
        }

        Ok(Self {
            targets,
            command: command.into(),
            concurrency,
        })
    }

    /// Targets in submission order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// An empty command means "attach interactively".
    pub fn is_interactive(&self) -> bool {
        is_interactive_command(&self.command)
    }
}

/// Whether `command` asks for an attached session rather than a batch run.
pub fn is_interactive_command(command: &str) -> bool {
    command.trim().is_empty()
}
