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

//! Configuration loading and priority management.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::Config;
use super::utils::expand_tilde;

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "fanssh.yaml";

impl Config {
    /// Load configuration from a file. A missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| format!("Failed to read configuration file at {}. Please check file permissions and ensure the file is accessible.", expanded_path.display()))?;

        Self::from_yaml(&content).with_context(|| {
            format!(
                "Failed to parse YAML configuration file at {}. Please check the YAML syntax is valid.",
                expanded_path.display()
            )
        })
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration with priority order:
    /// 1. Explicit --config path (must exist)
    /// 2. Current directory fanssh.yaml
    /// 3. XDG config directory ($XDG_CONFIG_HOME/fanssh/config.yaml or ~/.config/fanssh/config.yaml)
    pub async fn load_with_priority(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            let expanded_path = expand_tilde(path);
            if !expanded_path.exists() {
                anyhow::bail!("Config file not found: {:?}", expanded_path);
            }
            tracing::debug!("Using explicitly specified config file: {:?}", expanded_path);
            return Self::load(&expanded_path).await;
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            tracing::debug!("Using config file in current directory: {:?}", local_path);
            return Self::load(&local_path).await;
        }

        if let Some(user_path) = user_config_path() {
            if user_path.exists() {
                tracing::debug!("Using user config file: {:?}", user_path);
                return Self::load(&user_path).await;
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}

/// Per-user config file location.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "fanssh").map(|dirs| dirs.config_dir().join("config.yaml"))
}
