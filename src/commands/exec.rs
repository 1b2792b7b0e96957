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

use anyhow::Result;

use crate::error::ExecError;
use crate::executor::{
    is_interactive_command, ConsoleSinks, ExecutionRequest, ExitCodeStrategy, ParallelExecutor,
    SessionRunner, SshClientConfig, SshRunner,
};
use crate::target::Target;

use super::ssh::ssh_command;

pub struct ExecuteCommandParams<'a> {
    pub targets: Vec<Target>,
    pub command: &'a str,
    pub concurrency: usize,
    pub client: &'a SshClientConfig,
    pub exit_strategy: ExitCodeStrategy,
}

/// Run the command on every target and return the process exit code.
///
/// A blank command attaches an interactive session instead, going through
/// target selection when more than one target matched. The concurrency
/// limit only applies to batch runs.
pub async fn execute_command(params: ExecuteCommandParams<'_>) -> Result<i32> {
    if params.targets.is_empty() {
        return Err(ExecError::NoTargets.into());
    }

    if is_interactive_command(params.command) {
        tracing::debug!("No command given, attaching an interactive session");
        return ssh_command(&params.targets, "", params.client).await;
    }

    let request = ExecutionRequest::new(params.targets, params.command, params.concurrency)?;

    let runner = SshRunner::new(params.client.clone(), ConsoleSinks::process());
    run_batch(runner, &request, params.exit_strategy).await
}

/// Fan the request out through `runner` and fold the outcomes into an exit code.
pub async fn run_batch<R: SessionRunner>(
    runner: R,
    request: &ExecutionRequest,
    exit_strategy: ExitCodeStrategy,
) -> Result<i32> {
    tracing::info!(
        "Executing '{}' on {} targets (concurrency {})",
        request.command(),
        request.targets().len(),
        request.concurrency()
    );

    let executor = ParallelExecutor::new(runner);
    let outcomes = executor.execute(request).await?;

    let success_count = outcomes.iter().filter(|o| o.is_success()).count();
    let failed_count = outcomes.len() - success_count;
    tracing::info!(
        "Finished on {} targets: {} succeeded, {} failed",
        outcomes.len(),
        success_count,
        failed_count
    );

    Ok(exit_strategy.calculate(&outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailOn(&'static str);

    #[async_trait]
    impl SessionRunner for FailOn {
        async fn run(&self, target: &Target, _command: &str) -> Result<(), ExecError> {
            if target.address == self.0 {
                Err(ExecError::RemoteCommandFailure {
                    target: target.address.clone(),
                    code: Some(3),
                })
            } else {
                Ok(())
            }
        }
    }

    fn request(addresses: &[&str]) -> ExecutionRequest {
        let targets = addresses.iter().map(|a| Target::new(*a)).collect();
        ExecutionRequest::new(targets, "uptime", 2).unwrap()
    }

    #[tokio::test]
    async fn test_failures_are_informational_by_default() {
        let code = run_batch(
            FailOn("10.0.0.2"),
            &request(&["10.0.0.1", "10.0.0.2"]),
            ExitCodeStrategy::default(),
        )
        .await
        .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_require_all_success_reports_failure() {
        let code = run_batch(
            FailOn("10.0.0.2"),
            &request(&["10.0.0.1", "10.0.0.2"]),
            ExitCodeStrategy::RequireAllSuccess,
        )
        .await
        .unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_no_targets_is_an_error() {
        let client = SshClientConfig::default();
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
    }
}
