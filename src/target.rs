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

use std::fmt;

use crate::error::ExecError;

/// A single remote host, identified by the address handed to the ssh client.
///
/// `name` and `group` are display metadata for listings and the selection
/// prompt. Execution only ever looks at `address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub address: String,
    pub name: Option<String>,
    pub group: Option<String>,
}

impl Target {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            group: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check that the address can be handed to the remote-shell client.
    ///
    /// Rejects empty addresses, addresses with whitespace or control
    /// characters, and addresses starting with `-` (the client would read
    /// them as an option).
    pub fn validate(&self) -> Result<(), ExecError> {
        let reason = if self.address.is_empty() {
            Some("address is empty")
        } else if self.address.starts_with('-') {
            Some("address must not start with '-'")
        } else if self.address.chars().any(char::is_whitespace) {
            Some("address must not contain whitespace")
        } else if self.address.chars().any(char::is_control) {
            Some("address must not contain control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ExecError::InvalidTarget {
                target: self.address.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Case-insensitive substring match against name, group, and address.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [Some(&self.address), self.name.as_ref(), self.group.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn display_group(&self) -> &str {
        self.group.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}
