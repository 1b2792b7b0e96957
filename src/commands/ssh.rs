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
use std::io::{BufRead, Write};

use crate::executor::{run_interactive, should_use_colors, SshClientConfig};
use crate::select::select_target;
use crate::target::Target;

/// Attach the terminal to one of `targets`, asking on stdin when several match.
pub async fn ssh_command(
    targets: &[Target],
    attach: &str,
    client: &SshClientConfig,
) -> Result<i32> {
    let target = {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        select_target(targets, stdin.lock(), stdout.lock(), should_use_colors())?
    };

    attach_to(&target, attach, client).await
}

/// [`ssh_command`] reading the selection from `input` and writing the
/// prompt to `output`.
pub async fn ssh_command_with<R, W>(
    targets: &[Target],
    attach: &str,
    client: &SshClientConfig,
    input: R,
    output: W,
) -> Result<i32>
where
    R: BufRead,
    W: Write,
{
    let target = select_target(targets, input, output, false)?;
    attach_to(&target, attach, client).await
}

async fn attach_to(target: &Target, attach: &str, client: &SshClientConfig) -> Result<i32> {
    let attach = Some(attach).filter(|c| !c.trim().is_empty());
    tracing::info!("Connecting to {}", target);

    let code = run_interactive(client, target, attach).await?;
    if code != 0 {
        tracing::debug!("Session on {} ended with exit code {}", target.address, code);
    }
    Ok(code)
}
