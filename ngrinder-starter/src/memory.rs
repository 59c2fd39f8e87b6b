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

//! Available-memory precondition.

use sysinfo::{MemoryRefreshKind, RefreshKind, System};
use tracing::debug;

/// Minimum available memory required to start the controller (200 MiB).
pub const MIN_AVAILABLE_MEMORY: u64 = 200 * 1024 * 1024;

/// Setting this environment variable skips the memory check.
pub const UNIT_TEST_ENV: &str = "NGRINDER_UNIT_TEST";

/// Reads the memory currently available to new processes, in bytes.
pub fn available_memory() -> u64 {
    let system = System::new_with_specifics(
        RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
    );
    let available = system.available_memory();
    debug!("Available memory: {} bytes", available);
    available
}

/// Whether `available` bytes satisfy the precondition.
pub fn meets_minimum(available: u64) -> bool {
    available >= MIN_AVAILABLE_MEMORY
}

/// Whether the precondition is disabled for this process.
pub fn check_bypassed() -> bool {
    std::env::var_os(UNIT_TEST_ENV).is_some()
}

/// Memory precondition inputs, captured once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStatus {
    /// Skip the check entirely.
    pub bypassed: bool,
    /// Available memory in bytes.
    pub available: u64,
}

impl MemoryStatus {
    /// Reads the bypass flag and, unless bypassed, the available memory.
    pub fn current() -> Self {
        let bypassed = check_bypassed();
        let available = if bypassed { 0 } else { available_memory() };
        Self { bypassed, available }
    }

    /// Whether startup may proceed.
    pub fn satisfied(&self) -> bool {
        self.bypassed || meets_minimum(self.available)
    }
}
