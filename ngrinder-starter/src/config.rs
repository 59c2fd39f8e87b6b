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

//! Bootstrap configuration assembly.
//!
//! Raw tokens go through two independent parse passes: the top-level
//! schema first, then the selected cluster mode's schema over the tokens
//! the first pass did not recognise. The cluster mode publishes its
//! properties, and operator overrides (`-D`) are merged last so they
//! always win.

use crate::cli::{split_tokens, StarterArgs};
use ngrinder_core::args::{parse_tokens, render_usage};
use ngrinder_core::properties::keys;
use ngrinder_core::{ClusterMode, ClusterModeName, ConfigError, HomeHints, NetworkProbe, Properties};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Resolved startup configuration, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    /// HTTP listen port.
    pub http_port: u16,
    /// Context path, always starting with `/`.
    pub context_path: String,
    /// Active cluster mode and its parameters.
    pub cluster_mode: ClusterMode,
    /// Home directory, used as the server's working directory.
    pub home: PathBuf,
    /// Properties published to the controller.
    pub properties: Properties,
}

/// Result of a successful bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// `-help` was given: show this text and exit without starting anything.
    Help(String),
    /// Configuration is valid; the server may start.
    Ready(BootstrapConfig),
}

/// Fatal bootstrap failures.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration was rejected; `usage` belongs to the schema that rejected it.
    #[error("{source}")]
    Config {
        /// What was wrong.
        #[source]
        source: ConfigError,
        /// Usage text to show with the message.
        usage: String,
    },

    /// Not enough free memory to run the controller.
    #[error(
        "nGrinder needs at least {required_mib} MiB of available system memory (RAM) \
         but only {available_mib} MiB is free.\n\
         Close other applications to free memory, then run the same command again.\n{command}"
    )]
    InsufficientMemory {
        /// Required memory in MiB.
        required_mib: u64,
        /// Available memory in MiB.
        available_mib: u64,
        /// Command line that was rejected, to rerun once memory is freed.
        command: String,
    },

    /// The embedded server failed to start, stop or join.
    #[error("{0:#}")]
    Server(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Usage text to print after the message, if any.
    pub fn usage(&self) -> Option<&str> {
        match self {
            Self::Config { usage, .. } => Some(usage),
            _ => None,
        }
    }
}

/// Builds a [`BootstrapConfig`] from command line tokens.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    executable: String,
    home_hints: HomeHints,
}

impl Bootstrapper {
    /// Creates a bootstrapper.
    ///
    /// `executable` names the program in usage text. `home_hints` carries
    /// the environment part of the home directory precedence chain; the
    /// flag and property parts are filled from the command line.
    pub fn new(executable: impl Into<String>, home_hints: HomeHints) -> Self {
        Self {
            executable: executable.into(),
            home_hints,
        }
    }

    /// Usage text of the top-level flags.
    pub fn usage(&self) -> String {
        render_usage::<StarterArgs>(&self.executable)
    }

    /// Parses, validates and resolves the configuration.
    ///
    /// Probes run sequentially through `probe`. On error nothing is
    /// published and the caller is expected to exit.
    pub async fn bootstrap<S: AsRef<str>>(
        &self,
        tokens: &[S],
        probe: &dyn NetworkProbe,
    ) -> Result<Bootstrap, BootstrapError> {
        let split = split_tokens(tokens);
        debug!(
            "Top-level tokens: {:?}, cluster mode tokens: {:?}",
            split.recognized, split.unrecognized
        );

        let args: StarterArgs =
            parse_tokens(&self.executable, &split.recognized).map_err(|source| self.top_level(source))?;
        if args.help {
            return Ok(Bootstrap::Help(self.usage()));
        }

        let mode_name: ClusterModeName =
            args.cluster_mode.parse().map_err(|source| self.top_level(source))?;
        let cluster_mode = mode_name
            .parse(&self.executable, &split.unrecognized)
            .map_err(|source| self.cluster_mode(mode_name, source))?;
        let mut properties = cluster_mode
            .resolve(probe)
            .await
            .map_err(|source| self.cluster_mode(mode_name, source))?;

        let home = HomeHints {
            flag: args.home.clone(),
            property: last_value(&args.properties, keys::HOME),
            ..self.home_hints.clone()
        }
        .resolve();
        properties.set(keys::HOME, home.display());
        properties.merge_overrides(args.properties);

        let context_path = normalize_context_path(&args.context_path);
        validate_context_path(&context_path).map_err(|source| self.top_level(source))?;

        let config = BootstrapConfig {
            http_port: args.port,
            context_path,
            cluster_mode,
            home,
            properties,
        };
        info!(
            "Bootstrap resolved: cluster mode '{}', port {}, context path '{}', home {}",
            mode_name,
            config.http_port,
            config.context_path,
            config.home.display()
        );
        Ok(Bootstrap::Ready(config))
    }

    fn top_level(&self, source: ConfigError) -> BootstrapError {
        BootstrapError::Config {
            source,
            usage: self.usage(),
        }
    }

    fn cluster_mode(&self, mode: ClusterModeName, source: ConfigError) -> BootstrapError {
        BootstrapError::Config {
            source,
            usage: mode.usage(&self.executable),
        }
    }
}

/// Ensures the context path starts with `/` and has no trailing `/`.
pub fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Rejects normalised context paths the router cannot mount.
///
/// Braces would be read as route parameters, and segments starting with
/// `:` or `*` are reserved route syntax.
pub fn validate_context_path(path: &str) -> Result<(), ConfigError> {
    let reserved = path.contains(['{', '}'])
        || path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'));
    if reserved {
        return Err(ConfigError::InvalidContextPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

fn last_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_context_path() {
        assert_eq!(normalize_context_path("/"), "/");
        assert_eq!(normalize_context_path(""), "/");
        assert_eq!(normalize_context_path("app"), "/app");
        assert_eq!(normalize_context_path("/app"), "/app");
        assert_eq!(normalize_context_path("/app/"), "/app");
        assert_eq!(normalize_context_path("a/b"), "/a/b");
    }

    #[test]
    fn test_validate_context_path() {
        for path in ["/", "/app", "/a/b", "/app-1.0", "/a:b"] {
            assert!(validate_context_path(path).is_ok(), "{path} should be accepted");
        }
        for path in ["/app{", "/app}", "/{id}", "/:id", "/a/*rest"] {
            assert_eq!(
                validate_context_path(path),
                Err(ConfigError::InvalidContextPath {
                    path: path.to_string()
                })
            );
        }
    }

    #[test]
    fn test_insufficient_memory_message() {
        let err = BootstrapError::InsufficientMemory {
            required_mib: 200,
            available_mib: 12,
            command: "ngrinder -port=9000".to_string(),
        };
        let message = err.to_string();

        assert!(message.contains("at least 200 MiB of available system memory (RAM)"));
        assert!(message.contains("only 12 MiB is free"));
        assert!(message.ends_with("ngrinder -port=9000"));
        assert_eq!(err.usage(), None);
    }

    #[test]
    fn test_last_value() {
        let pairs = vec![
            ("ngrinder.home".to_string(), "/a".to_string()),
            ("other".to_string(), "x".to_string()),
            ("ngrinder.home".to_string(), "/b".to_string()),
        ];

        assert_eq!(last_value(&pairs, "ngrinder.home"), Some("/b".to_string()));
        assert_eq!(last_value(&pairs, "missing"), None);
    }

    #[test]
    fn test_usage_only_for_config_errors() {
        let err = BootstrapError::Config {
            source: ConfigError::LocalHostUnresolved,
            usage: "Usage: ngrinder".to_string(),
        };
        assert_eq!(err.usage(), Some("Usage: ngrinder"));
        assert_eq!(err.to_string(), "Failed to get the localhost");

        let err = BootstrapError::Server(anyhow::anyhow!("bind failed"));
        assert_eq!(err.usage(), None);
    }
}
