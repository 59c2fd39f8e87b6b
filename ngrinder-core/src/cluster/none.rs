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

//! Parameters of the `none` cluster mode.

use super::validate::validate_listen_port;
use crate::error::ConfigError;
use crate::probe::NetworkProbe;
use crate::properties::{keys, Properties};
use clap::Parser;

/// Single controller without clustering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct NoneModeArgs {
    /// Agent connection port
    #[arg(long = "controller-port", require_equals = true)]
    pub controller_port: Option<i64>,
}

impl NoneModeArgs {
    pub(crate) async fn validate(&self, probe: &dyn NetworkProbe) -> Result<(), ConfigError> {
        if let Some(port) = self.controller_port {
            validate_listen_port(probe, "-controller-port", port).await?;
        }
        Ok(())
    }

    pub(crate) fn process(&self) -> Properties {
        let mut props = Properties::new();
        if let Some(port) = self.controller_port {
            props.set(keys::CONTROLLER_PORT, port);
        }
        props
    }
}
