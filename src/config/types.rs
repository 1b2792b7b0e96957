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

//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::executor::{ExitCodeStrategy, SshClientConfig, DEFAULT_CONCURRENCY};
use crate::target::Target;

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Words replaced on the command line before parsing, e.g.
    /// `up: "exec uptime"`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// Named host groups making up the static inventory.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<HostConfig>>,
}

/// Global default settings.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Defaults {
    /// Maximum concurrent sessions in batch mode.
    pub concurrency: Option<usize>,
    /// Remote-shell client to run. Default: `ssh`
    pub ssh_program: Option<String>,
    /// Extra client arguments, placed before the target.
    #[serde(default)]
    pub ssh_options: Vec<String>,
    /// Force pty allocation (`-tt`) in batch mode.
    #[serde(default)]
    pub batch_tty: bool,
    /// How per-host failures affect the exit code of a batch run.
    #[serde(default)]
    pub exit_strategy: ExitCodeStrategy,
}

/// Host entry within a group.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum HostConfig {
    Simple(String),
    Detailed {
        host: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl HostConfig {
    pub fn host(&self) -> &str {
        match self {
            HostConfig::Simple(host) => host,
            HostConfig::Detailed { host, .. } => host,
        }
    }

    /// Build a target labeled with the group it came from.
    pub fn to_target(&self, group: &str) -> Target {
        let target = Target::new(self.host()).with_group(group);
        match self {
            HostConfig::Detailed {
                name: Some(name), ..
            } => target.with_name(name.clone()),
            _ => target,
        }
    }
}

impl Config {
    /// Concurrency from the config, or the built-in default.
    pub fn concurrency(&self) -> usize {
        self.defaults.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Client settings for launching sessions.
    pub fn ssh_client(&self) -> SshClientConfig {
        let defaults = SshClientConfig::default();
        SshClientConfig {
            program: self
                .defaults
                .ssh_program
                .clone()
                .unwrap_or(defaults.program),
            options: self.defaults.ssh_options.clone(),
            batch_tty: self.defaults.batch_tty,
        }
    }

    /// Targets of one group, in file order.
    pub fn group_targets(&self, group: &str) -> Option<Vec<Target>> {
        self.groups
            .get(group)
            .map(|hosts| hosts.iter().map(|h| h.to_target(group)).collect())
    }

    /// Targets of every group, groups in name order.
    pub fn all_targets(&self) -> Vec<Target> {
        self.groups
            .iter()
            .flat_map(|(group, hosts)| hosts.iter().map(move |h| h.to_target(group)))
            .collect()
    }
}
