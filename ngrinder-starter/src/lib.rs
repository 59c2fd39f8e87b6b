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

//! nGrinder Starter - launcher for the controller web application.
//!
//! This crate provides:
//! - The top-level command line and its hand-off to the cluster mode parser
//! - Bootstrap configuration assembly and home directory resolution
//! - The available-memory precondition
//! - The embedded HTTP server lifecycle

pub mod app;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod memory;

pub use app::{ServerLifecycle, ShutdownTrigger};
pub use config::{Bootstrap, BootstrapConfig, BootstrapError, Bootstrapper};

use memory::MemoryStatus;
use ngrinder_core::{HomeHints, NetworkProbe, SocketProbe};
use tracing::info;

/// Exit status for help output and normal shutdown.
pub const EXIT_OK: i32 = 0;

/// Exit status for every fatal error.
pub const EXIT_FATAL: i32 = -1;

/// How a launcher run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Help was requested; nothing was started.
    Help(String),
    /// The server ran and was shut down cleanly.
    Shutdown,
}

/// Runs the launcher with the given command line tokens (program name excluded).
///
/// Checks the memory precondition, resolves the configuration, then serves
/// the controller until shutdown is requested.
pub async fn run(tokens: &[String]) -> Result<RunOutcome, BootstrapError> {
    run_with(tokens, MemoryStatus::current(), &SocketProbe).await
}

/// [`run`] with the memory status and network probe supplied by the caller.
///
/// The memory precondition is checked before any token is parsed.
pub async fn run_with(
    tokens: &[String],
    memory: MemoryStatus,
    probe: &dyn NetworkProbe,
) -> Result<RunOutcome, BootstrapError> {
    let executable = bundle::executable_name();
    ensure_available_memory(&executable, tokens, memory)?;

    let bootstrapper = Bootstrapper::new(executable, HomeHints::from_process());
    let config = match bootstrapper.bootstrap(tokens, probe).await? {
        Bootstrap::Help(usage) => return Ok(RunOutcome::Help(usage)),
        Bootstrap::Ready(config) => config,
    };

    let lifecycle = ServerLifecycle::new(config, bundle::resolve_bundle());
    lifecycle.run(&ShutdownTrigger::new()).await?;
    Ok(RunOutcome::Shutdown)
}

fn ensure_available_memory(
    executable: &str,
    tokens: &[String],
    memory: MemoryStatus,
) -> Result<(), BootstrapError> {
    if memory.bypassed {
        info!("Memory precondition skipped ({} is set)", memory::UNIT_TEST_ENV);
        return Ok(());
    }
    if memory.satisfied() {
        return Ok(());
    }

    let mib = |bytes: u64| bytes / (1024 * 1024);
    let command = std::iter::once(executable)
        .chain(tokens.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    Err(BootstrapError::InsufficientMemory {
        required_mib: mib(memory::MIN_AVAILABLE_MEMORY),
        available_mib: mib(memory.available),
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    const LOW: MemoryStatus = MemoryStatus {
        bypassed: false,
        available: 10 * 1024 * 1024,
    };

    #[tokio::test]
    async fn test_low_memory_fails_before_parsing() {
        let result = run_with(&tokens(&["-cluster-mode=bogus", "-port=x"]), LOW, &SocketProbe).await;

        let Err(BootstrapError::InsufficientMemory {
            required_mib,
            available_mib,
            command,
        }) = &result
        else {
            panic!("expected insufficient memory, got {result:?}");
        };
        assert_eq!(*required_mib, 200);
        assert_eq!(*available_mib, 10);
        assert!(command.ends_with("-cluster-mode=bogus -port=x"));
    }

    #[tokio::test]
    async fn test_bypass_continues_to_bootstrap() {
        let bypassed = MemoryStatus {
            bypassed: true,
            ..LOW
        };
        let result = run_with(&tokens(&["-help"]), bypassed, &SocketProbe).await;

        assert!(matches!(result, Ok(RunOutcome::Help(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn test_enough_memory_continues_to_bootstrap() {
        let enough = MemoryStatus {
            bypassed: false,
            available: memory::MIN_AVAILABLE_MEMORY,
        };
        let result = run_with(&tokens(&["-cluster-mode=bogus"]), enough, &SocketProbe).await;

        let Err(BootstrapError::Config { source, .. }) = &result else {
            panic!("expected a configuration error, got {result:?}");
        };
        assert!(source.to_string().starts_with("Invalid cluster mode 'bogus'"));
    }
}
