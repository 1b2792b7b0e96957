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

//! Bounded fan-out of one command over many targets.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error::ExecError;

use super::request::ExecutionRequest;
use super::result_types::ExecutionOutcome;
use super::session::SessionRunner;

/// Parallel executor for running one command across many targets.
///
/// The pool holds `concurrency` tokens. A token is taken before a session is
/// spawned, in submission order, and returned when that session's task ends,
/// whatever the result. `execute` returns only after every task has finished.
pub struct ParallelExecutor<R> {
    runner: Arc<R>,
}

impl<R: SessionRunner> ParallelExecutor<R> {
    pub fn new(runner: R) -> Self {
        Self::from_shared(Arc::new(runner))
    }

    pub fn from_shared(runner: Arc<R>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the request's command on every target, at most
    /// `request.concurrency()` at a time.
    ///
    /// Returns exactly one outcome per target, in submission order. Failures
    /// of individual targets are recorded in their outcome and logged; they
    /// never stop other targets. Fails only with `NoTargets`.
    ///
    /// A limit above the number of targets behaves like one slot per target.
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
    ) -> Result<Vec<ExecutionOutcome>, ExecError> {
        if request.targets().is_empty() {
            return Err(ExecError::NoTargets);
        }

        // Capped at the target count; Semaphore::new panics above MAX_PERMITS
        let pool_size = request.concurrency().min(request.targets().len());
        let semaphore = Arc::new(Semaphore::new(pool_size));
        let mut handles: Vec<JoinHandle<Result<(), ExecError>>> =
            Vec::with_capacity(request.targets().len());

        for target in request.targets() {
            // Blocks the submitter while the pool is saturated. The semaphore
            // is local and never closed, so acquiring cannot fail.
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| ExecError::TaskFailed {
                    target: target.address.clone(),
                    reason: e.to_string(),
                })?;

            let runner = Arc::clone(&self.runner);
            let target = target.clone();
            let command = request.command().to_string();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                runner.run(&target, &command).await
            }));
        }

        let results = join_all(handles).await;
        Ok(self.collect_outcomes(request, results))
    }

    /// Pair each task result with its target, turning panics into failures.
    fn collect_outcomes(
        &self,
        request: &ExecutionRequest,
        results: Vec<Result<Result<(), ExecError>, tokio::task::JoinError>>,
    ) -> Vec<ExecutionOutcome> {
        request
            .targets()
            .iter()
            .zip(results)
            .map(|(target, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    Err(ExecError::TaskFailed {
                        target: target.address.clone(),
                        reason: e.to_string(),
                    })
                });

                if let Err(e) = &result {
                    tracing::error!("{}", e);
                }

                ExecutionOutcome::new(target.clone(), result)
            })
            .collect()
    }
}
