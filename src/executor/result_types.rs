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

//! Per-target results of a batch run.

use crate::error::ExecError;
use crate::target::Target;

/// Result of running the batch command on a single target.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub target: Target,
    pub result: Result<(), ExecError>,
}

impl ExecutionOutcome {
    pub fn new(target: Target, result: Result<(), ExecError>) -> Self {
        Self { target, result }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ExecError> {
        self.result.as_ref().err()
    }

    /// The remote exit code, or 1 for failures that never reached the remote
    /// side.
    pub fn exit_code(&self) -> i32 {
        match &self.result {
            Ok(()) => 0,
            Err(err) => err.exit_code(),
        }
    }
}
