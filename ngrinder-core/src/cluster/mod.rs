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

//! Cluster modes.
//!
//! Exactly one mode is active per process. Each mode owns its parameter
//! schema, which is parsed from the tokens the top-level parser did not
//! recognise. Resolving a mode validates its parameters and derives the
//! properties the controller reads at runtime.
//!
//! | Mode       | Required flags                                   | Publishes                                |
//! |------------|--------------------------------------------------|------------------------------------------|
//! | `none`     | -                                                | controller port when given               |
//! | `easy`     | `-cluster-port`, `-controller-port`, `-region`   | cluster settings, database type and URL  |
//! | `advanced` | -                                                | cluster mode flag                        |

mod advanced;
mod easy;
mod none;
mod validate;

pub use advanced::AdvancedModeArgs;
pub use easy::{DatabaseKind, EasyModeArgs, DEFAULT_DATABASE_PORT, DEFAULT_DATABASE_TYPE};
pub use none::NoneModeArgs;
pub use validate::validate_listen_port;

use crate::args::{parse_tokens, render_usage};
use crate::error::ConfigError;
use crate::probe::NetworkProbe;
use crate::properties::Properties;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Name of a cluster mode as given by `-cluster-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClusterModeName {
    /// Single controller, no clustering.
    #[default]
    None,
    /// Cluster coordinated by the controllers themselves over a shared database.
    Easy,
    /// Cluster coordinated by external configuration.
    Advanced,
}

impl ClusterModeName {
    /// All modes, in the order they are documented.
    pub const ALL: [ClusterModeName; 3] = [Self::None, Self::Easy, Self::Advanced];

    /// Name as written on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Easy => "easy",
            Self::Advanced => "advanced",
        }
    }

    /// Program name shown in this mode's usage text.
    pub fn program(self, executable: &str) -> String {
        match self {
            Self::None => executable.to_string(),
            other => format!("{executable} -cluster-mode={}", other.as_str()),
        }
    }

    /// Usage text of this mode's own parameters.
    pub fn usage(self, executable: &str) -> String {
        let program = self.program(executable);
        match self {
            Self::None => render_usage::<NoneModeArgs>(&program),
            Self::Easy => render_usage::<EasyModeArgs>(&program),
            Self::Advanced => render_usage::<AdvancedModeArgs>(&program),
        }
    }

    /// Parses `tokens` against this mode's schema.
    pub fn parse(self, executable: &str, tokens: &[String]) -> Result<ClusterMode, ConfigError> {
        let program = self.program(executable);
        Ok(match self {
            Self::None => ClusterMode::None(parse_tokens(&program, tokens)?),
            Self::Easy => ClusterMode::Easy(parse_tokens(&program, tokens)?),
            Self::Advanced => ClusterMode::Advanced(parse_tokens(&program, tokens)?),
        })
    }
}

impl fmt::Display for ClusterModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterModeName {
    type Err = ConfigError;

    /// Case-sensitive match against the known mode names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownClusterMode {
                name: s.to_string(),
            })
    }
}

/// The active cluster mode together with its parsed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterMode {
    /// `-cluster-mode=none`
    None(NoneModeArgs),
    /// `-cluster-mode=easy`
    Easy(EasyModeArgs),
    /// `-cluster-mode=advanced`
    Advanced(AdvancedModeArgs),
}

impl ClusterMode {
    /// Name of the active mode.
    pub fn name(&self) -> ClusterModeName {
        match self {
            Self::None(_) => ClusterModeName::None,
            Self::Easy(_) => ClusterModeName::Easy,
            Self::Advanced(_) => ClusterModeName::Advanced,
        }
    }

    /// Validates the mode's parameters and derives its properties.
    ///
    /// All parameter validators run before any cross-field check, so a
    /// rejected port stops the bootstrap before the database is probed.
    /// Nothing is returned on failure.
    pub async fn resolve(&self, probe: &dyn NetworkProbe) -> Result<Properties, ConfigError> {
        info!("Resolving cluster mode '{}'", self.name());
        match self {
            Self::None(args) => {
                args.validate(probe).await?;
                Ok(args.process())
            }
            Self::Easy(args) => {
                args.validate(probe).await?;
                args.process(probe).await
            }
            Self::Advanced(args) => Ok(args.process()),
        }
    }
}
