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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fanssh",
    version,
    about = "Fan a command out to many hosts over ssh",
    long_about = "fanssh runs one command on many hosts through the system ssh client.\nSessions run in parallel up to a configurable limit, and every output line is labeled\nand colored by the host it came from. A failing host never stops the others.\nWith a single target, or no command, fanssh attaches an interactive ssh session instead.",
    after_help = "EXAMPLES:\n  Run on explicit hosts:        fanssh -H 10.0.0.1,10.0.0.2 exec uptime\n  Run on a config group:        fanssh -g web exec -c 5 'df -h'\n  Pick a host and log in:       fanssh -g web ssh\n  Log in and tail a file:       fanssh -f web-1 ssh 'tail -f /var/log/syslog'\n  List the resolved targets:    fanssh -g web list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'H',
        long,
        global = true,
        value_delimiter = ',',
        help = "Comma-separated list of target addresses (anything ssh accepts, e.g. user@host)"
    )]
    pub hosts: Vec<String>,

    #[arg(
        short = 'g',
        long = "group",
        global = true,
        help = "Host group from the configuration file (repeatable)"
    )]
    pub groups: Vec<String>,

    #[arg(
        short = 'f',
        long,
        global = true,
        help = "Only keep targets whose name, group, or address contains this text"
    )]
    pub filter: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Configuration file path\nConfig loading priority:\n  1. This flag's value\n  2. Current directory (./fanssh.yaml)\n  3. User config (~/.config/fanssh/config.yaml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        visible_alias = "e",
        about = "Execute a command on all targets",
        long_about = "Runs the command on every target, at most --concurrency at a time.\nOutput lines are prefixed with the host they came from.\nWithout a command, attaches an interactive session instead (asking which host when several match).\n\nExit codes: 0 once all hosts finished; with --fail-on-error, 1 if any host failed"
    )]
    Exec {
        #[arg(
            short = 'c',
            long,
            help = "Maximum concurrent sessions [default: from config, or 2]"
        )]
        concurrency: Option<usize>,

        #[arg(long, help = "Exit with status 1 if any host failed")]
        fail_on_error: bool,

        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            help = "Command to run on every target"
        )]
        command: Vec<String>,
    },

    #[command(
        about = "Open an interactive ssh session on one target",
        long_about = "Attaches your terminal to an ssh session. When several targets match,\na numbered table is shown and you pick one (Enter picks the first).\nAn optional command is run in a remote login shell instead of a plain shell."
    )]
    Ssh {
        #[arg(
            trailing_var_arg = true,
            allow_hyphen_values = true,
            help = "Command to attach to the session"
        )]
        exec: Vec<String>,
    },

    #[command(visible_alias = "ls", about = "List the resolved targets")]
    List,
}

impl Cli {
    /// Batch command joined from its words.
    pub fn get_command(&self) -> String {
        match &self.command {
            Commands::Exec { command, .. } => command.join(" "),
            Commands::Ssh { exec } => exec.join(" "),
            Commands::List => String::new(),
        }
    }
}
