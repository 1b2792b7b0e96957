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

//! Parallel execution framework for remote sessions.

mod output_sync;
mod parallel;
mod request;
mod result_types;

pub mod exit_strategy;
pub mod prefix;
pub mod session;

// Re-export public types
pub use exit_strategy::ExitCodeStrategy;
pub use output_sync::{is_tty, shared_sink, should_use_colors, ConsoleSinks, SharedSink};
pub use parallel::ParallelExecutor;
pub use prefix::PrefixWriter;
pub use request::{is_interactive_command, ExecutionRequest, DEFAULT_CONCURRENCY};
pub use result_types::ExecutionOutcome;
pub use session::{run_interactive, Session, SessionRunner, SshClientConfig, SshRunner};
