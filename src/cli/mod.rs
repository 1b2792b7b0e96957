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

//! CLI module for fanssh
//!
//! - `parser.rs` - clap parser with the global target options and subcommands
//! - `alias.rs` - config-driven alias expansion applied before parsing

mod alias;
mod parser;

pub use alias::{config_path_from_args, expand_aliases};
pub use parser::{Cli, Commands};
