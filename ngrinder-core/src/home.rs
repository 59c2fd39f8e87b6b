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

//! Home directory resolution.

use std::path::PathBuf;

/// Environment variable pointing at the home directory.
pub const HOME_ENV: &str = "NGRINDER_HOME";

/// Folder created under the user's home when nothing else is configured.
pub const DEFAULT_HOME_FOLDER: &str = ".ngrinder";

/// Inputs of the home directory precedence chain.
///
/// Empty strings count as absent at every level.
#[derive(Debug, Clone, Default)]
pub struct HomeHints {
    /// Explicit `-home` flag.
    pub flag: Option<String>,
    /// Value of [`HOME_ENV`].
    pub env: Option<String>,
    /// `ngrinder.home` property supplied as an operator override.
    pub property: Option<String>,
    /// Home directory of the operating user.
    pub user_home: Option<PathBuf>,
}

impl HomeHints {
    /// Collects the environment-derived hints of the current process.
    pub fn from_process() -> Self {
        Self {
            flag: None,
            env: std::env::var(HOME_ENV).ok(),
            property: None,
            user_home: dirs::home_dir(),
        }
    }

    /// Resolves the home directory: flag, then environment, then property,
    /// then `<user home>/.ngrinder`.
    pub fn resolve(&self) -> PathBuf {
        [&self.flag, &self.env, &self.property]
            .into_iter()
            .flatten()
            .find(|hint| !hint.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                self.user_home
                    .clone()
                    .unwrap_or_default()
                    .join(DEFAULT_HOME_FOLDER)
            })
    }
}
