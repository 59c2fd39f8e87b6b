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

//! Location of the packaged controller web application.

use std::path::{Path, PathBuf};

/// Environment variable overriding the bundle location.
pub const BUNDLE_ENV: &str = "NGRINDER_BUNDLE";

/// Directory name looked up next to the executable.
pub const BUNDLE_DIR: &str = "ngrinder-controller";

/// Executable name used in usage text when the real one is unknown.
pub const DEFAULT_EXECUTABLE: &str = "ngrinder";

/// Resolves the bundle directory: [`BUNDLE_ENV`] when set, otherwise
/// [`BUNDLE_DIR`] beside the running executable.
///
/// The path is not checked here; the server refuses to start if it is missing.
pub fn resolve_bundle() -> PathBuf {
    let from_env = std::env::var(BUNDLE_ENV).ok().filter(|path| !path.is_empty());
    let exe = std::env::current_exe().ok();
    bundle_path(from_env.as_deref(), exe.as_deref())
}

fn bundle_path(from_env: Option<&str>, exe: Option<&Path>) -> PathBuf {
    if let Some(path) = from_env {
        return PathBuf::from(path);
    }
    exe.and_then(Path::parent)
        .map_or_else(|| PathBuf::from(BUNDLE_DIR), |dir| dir.join(BUNDLE_DIR))
}

/// File name of the running executable, for usage text and launch hints.
pub fn executable_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string())
}
