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

//! Static target inventory: hosts from the command line and config groups.

use anyhow::Result;
use std::collections::HashSet;

use crate::config::Config;
use crate::target::Target;

/// What the operator asked for on the command line.
#[derive(Debug, Default, Clone)]
pub struct TargetQuery<'a> {
    /// Addresses given directly with `-H`
    pub hosts: &'a [String],
    /// Config groups given with `-g`
    pub groups: &'a [String],
    /// Substring filter on name, group, or address
    pub filter: Option<&'a str>,
}

/// Resolve a query into an ordered, de-duplicated target list.
///
/// Explicit hosts come first, then the requested groups in the order given.
/// With neither, every configured group is used. Duplicate addresses keep
/// their first occurrence. An empty result is not an error here; callers
/// decide whether that is fatal.
pub fn resolve_targets(config: &Config, query: &TargetQuery<'_>) -> Result<Vec<Target>> {
    let mut candidates: Vec<Target> = query
        .hosts
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .map(Target::new)
        .collect();

    for group in query.groups {
        match config.group_targets(group) {
            Some(targets) => candidates.extend(targets),
            None => anyhow::bail!(
                "Group '{}' not found in configuration. Available groups: {}",
                group,
                available_groups(config)
            ),
        }
    }

    if query.hosts.is_empty() && query.groups.is_empty() {
        candidates = config.all_targets();
    }

    let mut seen = HashSet::new();
    candidates.retain(|t| seen.insert(t.address.clone()));

    if let Some(filter) = query.filter.filter(|f| !f.trim().is_empty()) {
        candidates.retain(|t| t.matches(filter.trim()));
    }

    tracing::debug!("Resolved {} target(s)", candidates.len());
    Ok(candidates)
}

fn available_groups(config: &Config) -> String {
    if config.groups.is_empty() {
        "(none)".to_string()
    } else {
        config
            .groups
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
