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

//! Parameters of the `advanced` cluster mode.

use crate::properties::{keys, Properties};
use clap::Parser;

/// Cluster whose coordination is configured outside the launcher.
///
/// Takes no flags; only the mode itself is published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct AdvancedModeArgs {}

impl AdvancedModeArgs {
    pub(crate) fn process(&self) -> Properties {
        let mut props = Properties::new();
        props.set(keys::CLUSTER_MODE, "advanced");
        props
    }
}
