// Copyright 2026 nGrinder Team
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

//! Top-level command line schema.
//!
//! The top-level parser only understands its own flags. Every other token
//! is kept, in order, for the selected cluster mode's parser.

use clap::{CommandFactory, Parser};
use ngrinder_core::args::{flag_name, to_clap_token};

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// nGrinder controller launcher
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "ngrinder", disable_help_flag = true, disable_version_flag = true)]
pub struct StarterArgs {
    /// HTTP port of the server. The default is 8080
    #[arg(long, require_equals = true, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Context path of the embedded web application. The default is /
    #[arg(long = "context-path", require_equals = true, default_value = "/")]
    pub context_path: String,

    /// nGrinder cluster mode: none, easy or advanced
    #[arg(long = "cluster-mode", require_equals = true, default_value = "none")]
    pub cluster_mode: String,

    /// nGrinder home
    #[arg(long, require_equals = true)]
    pub home: Option<String>,

    /// Prints this message
    #[arg(long, hide = true)]
    pub help: bool,

    /// Dynamic properties, e.g. -Dcontroller.max_agent_per_test=20
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

/// Tokens after the split into the two parse passes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitTokens {
    /// Tokens addressed to [`StarterArgs`], already in clap form.
    pub recognized: Vec<String>,
    /// Everything else, verbatim and in original order.
    pub unrecognized: Vec<String>,
}

/// Separates top-level tokens from the ones meant for the cluster mode.
pub fn split_tokens<I, S>(tokens: I) -> SplitTokens
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let command = StarterArgs::command();
    let known = |name: &str| {
        command.get_arguments().any(|arg| {
            arg.get_long() == Some(name)
                || arg.get_short().is_some_and(|short| name.chars().eq([short]))
        })
    };

    let mut split = SplitTokens::default();
    for token in tokens {
        let token = token.as_ref();
        let normalized = to_clap_token(token);
        match flag_name(&normalized) {
            Some(name) if known(name) => split.recognized.push(normalized),
            _ => split.unrecognized.push(token.to_string()),
        }
    }
    split
}

/// Parses a `key=value` dynamic property.
fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("'{raw}' is not a key=value pair")),
    }
}
