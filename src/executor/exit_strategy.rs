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

//! Exit code calculation for batch runs.
//!
//! A batch always runs every target to completion. What the process reports
//! afterwards is a policy choice:
//!
//! - **Informational** (default): per-host failures are reported as
//!   diagnostics only and the batch exits 0 once every session has finished.
//! - **RequireAllSuccess**: exit 1 if any host failed. Useful for health checks
//!   and scripts that must notice partial failures.

use serde::{Deserialize, Serialize};

use super::result_types::ExecutionOutcome;

/// Strategy for turning per-target outcomes into a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCodeStrategy {
    /// Failures are logged but do not change the exit code.
    #[default]
    Informational,

    /// Return 0 only if every target succeeded, 1 otherwise.
    RequireAllSuccess,
}

impl ExitCodeStrategy {
    /// Calculate the final exit code based on the strategy.
    pub fn calculate(&self, outcomes: &[ExecutionOutcome]) -> i32 {
        match self {
            Self::Informational => 0,
            Self::RequireAllSuccess => {
                if outcomes.iter().any(|o| !o.is_success()) {
                    1
                } else {
                    0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecError;
    use crate::target::Target;

    fn create_success_outcome(host: &str) -> ExecutionOutcome {
        ExecutionOutcome::new(Target::new(host), Ok(()))
    }

    fn create_failure_outcome(host: &str, exit_code: i32) -> ExecutionOutcome {
        ExecutionOutcome::new(
            Target::new(host),
            Err(ExecError::RemoteCommandFailure {
                target: host.to_string(),
                code: Some(exit_code),
            }),
        )
    }

    fn create_spawn_error_outcome(host: &str) -> ExecutionOutcome {
        ExecutionOutcome::new(
            Target::new(host),
            Err(ExecError::ProcessSpawnFailure {
                target: host.to_string(),
                program: "ssh".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        )
    }

    #[test]
    fn test_default_strategy_is_informational() {
        assert_eq!(ExitCodeStrategy::default(), ExitCodeStrategy::Informational);
    }

    #[test]
    fn test_informational_ignores_failures() {
        let outcomes = vec![
            create_success_outcome("host1"),
            create_failure_outcome("host2", 139),
            create_spawn_error_outcome("host3"),
        ];

        assert_eq!(ExitCodeStrategy::Informational.calculate(&outcomes), 0);
    }

    #[test]
    fn test_require_all_success_all_ok() {
        let outcomes = vec![
            create_success_outcome("host1"),
            create_success_outcome("host2"),
        ];

        assert_eq!(ExitCodeStrategy::RequireAllSuccess.calculate(&outcomes), 0);
    }

    #[test]
    fn test_require_all_success_one_failed() {
        let outcomes = vec![
            create_success_outcome("host1"),
            create_failure_outcome("host2", 3),
        ];

        assert_eq!(ExitCodeStrategy::RequireAllSuccess.calculate(&outcomes), 1);
    }

    #[test]
    fn test_require_all_success_spawn_error() {
        let outcomes = vec![create_spawn_error_outcome("host1")];

        assert_eq!(ExitCodeStrategy::RequireAllSuccess.calculate(&outcomes), 1);
    }

    #[test]
    fn test_strategy_deserialize() {
        let strategy: ExitCodeStrategy = serde_yaml::from_str("require_all_success").unwrap();
        assert_eq!(strategy, ExitCodeStrategy::RequireAllSuccess);

        let strategy: ExitCodeStrategy = serde_yaml::from_str("informational").unwrap();
        assert_eq!(strategy, ExitCodeStrategy::Informational);
    }
}
