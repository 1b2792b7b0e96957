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
use clap::Parser;
use owo_colors::OwoColorize;

use fanssh::{
    cli::{config_path_from_args, expand_aliases, Cli, Commands},
    commands::{
        exec::{execute_command, ExecuteCommandParams},
        list::list_targets,
        ssh::ssh_command,
    },
    config::Config,
    executor::ExitCodeStrategy,
    inventory::{resolve_targets, TargetQuery},
    utils::init_logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();

    // Aliases live in the config file, so it is loaded before clap runs
    let config_path = config_path_from_args(&args);
    let config = Config::load_with_priority(config_path.as_deref()).await?;

    if let Some(expanded) = expand_aliases(&args, &config.aliases)? {
        eprintln!("{}", format!("fanssh {}", expanded[1..].join(" ")).dimmed());
        args = expanded;
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    let query = TargetQuery {
        hosts: &cli.hosts,
        groups: &cli.groups,
        filter: cli.filter.as_deref(),
    };
    let targets = resolve_targets(&config, &query)?;

    let client = config.ssh_client();
    let command = cli.get_command();

    let exit_code = match &cli.command {
        Commands::Exec {
            concurrency,
            fail_on_error,
            ..
        } => {
            let exit_strategy = if *fail_on_error {
                ExitCodeStrategy::RequireAllSuccess
            } else {
                config.defaults.exit_strategy
            };

            execute_command(ExecuteCommandParams {
                targets,
                command: &command,
                concurrency: concurrency.unwrap_or_else(|| config.concurrency()),
                client: &client,
                exit_strategy,
            })
            .await?
        }
        Commands::Ssh { .. } => ssh_command(&targets, &command, &client).await?,
        Commands::List => {
            list_targets(&targets);
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
