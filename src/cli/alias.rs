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

//! Command-line alias expansion.
//!
//! The config file can map a word to a replacement argument string:
//!
//! ```yaml
//! aliases:
//!   web-up: "-g web exec uptime"
//! ```
//!
//! Every argument equal to an alias key is replaced by the replacement,
//! split with shell quoting rules, before clap sees the arguments.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Expand aliases in `args` (including the program name at index 0, which is
/// never expanded).
///
/// Returns `None` when no argument matched an alias.
pub fn expand_aliases(
    args: &[String],
    aliases: &HashMap<String, String>,
) -> Result<Option<Vec<String>>> {
    if aliases.is_empty() {
        return Ok(None);
    }

    let mut expanded = Vec::with_capacity(args.len());
    let mut aliased = false;

    for (i, arg) in args.iter().enumerate() {
        match aliases.get(arg) {
            Some(replacement) if i > 0 => {
                let words = shell_words::split(replacement)
                    .with_context(|| format!("Invalid alias '{arg}': {replacement}"))?;
                expanded.extend(words);
                aliased = true;
            }
            _ => expanded.push(arg.clone()),
        }
    }

    Ok(aliased.then_some(expanded))
}

/// Find the `--config` value before clap runs, so aliases can be loaded from
/// the right file.
pub fn config_path_from_args(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        if arg == "--config" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(value) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(value));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn aliases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_aliases_configured() {
        let result = expand_aliases(&args(&["fanssh", "list"]), &HashMap::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_no_alias_matched() {
        let aliases = aliases(&[("up", "exec uptime")]);
        let result = expand_aliases(&args(&["fanssh", "list"]), &aliases).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_alias_expands_with_quoting() {
        let aliases = aliases(&[("logs", "-g web exec 'tail -n 20 /var/log/app.log'")]);
        let result = expand_aliases(&args(&["fanssh", "-v", "logs"]), &aliases)
            .unwrap()
            .unwrap();

        assert_eq!(
            result,
            args(&[
                "fanssh",
                "-v",
                "-g",
                "web",
                "exec",
                "tail -n 20 /var/log/app.log"
            ])
        );
    }

    #[test]
    fn test_program_name_not_expanded() {
        let aliases = aliases(&[("fanssh", "exec uptime")]);
        let result = expand_aliases(&args(&["fanssh", "list"]), &aliases).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_alias() {
        let aliases = aliases(&[("broken", "exec 'unterminated")]);
        let err = expand_aliases(&args(&["fanssh", "broken"]), &aliases).unwrap_err();
        assert!(err.to_string().contains("Invalid alias 'broken'"));
    }

    #[test]
    fn test_config_path_from_args() {
        assert_eq!(
            config_path_from_args(&args(&["fanssh", "--config", "/tmp/a.yaml", "list"])),
            Some(PathBuf::from("/tmp/a.yaml"))
        );
        assert_eq!(
            config_path_from_args(&args(&["fanssh", "--config=/tmp/b.yaml", "list"])),
            Some(PathBuf::from("/tmp/b.yaml"))
        );
        assert_eq!(config_path_from_args(&args(&["fanssh", "list"])), None);
        assert_eq!(
            config_path_from_args(&args(&["fanssh", "exec", "--", "--config", "x"])),
            None
        );
    }
}
