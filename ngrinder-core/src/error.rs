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

//! Error types for cluster-mode resolution.

use thiserror::Error;

/// Errors that stop the bootstrap before the server starts.
///
/// Every variant is fatal. The operator sees the message together with the
/// usage text of the schema that rejected the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The `-cluster-mode` value does not name a known mode.
    #[error("Invalid cluster mode '{name}'. Available modes: none, easy, advanced")]
    UnknownClusterMode {
        /// Name given on the command line.
        name: String,
    },

    /// Tokens did not match the schema (missing required flag, bad number, stray token).
    #[error("{message}")]
    InvalidArguments {
        /// Parser message, already rendered for the operator.
        message: String,
    },

    /// A listen port lies outside the 16-bit unsigned range.
    #[error("{name}={value} port is out of range. The port should be within 0 and {max}", max = u16::MAX)]
    PortOutOfRange {
        /// Flag that carried the value.
        name: String,
        /// Rejected value.
        value: i64,
    },

    /// A listen port could not be bound on the local host.
    #[error(
        "{name}={value} port is already occupied by the other system or failed to bind. \
         Please use the other port"
    )]
    PortOccupied {
        /// Flag that carried the value.
        name: String,
        /// Rejected value.
        value: i64,
    },

    /// The context path cannot be used as a route prefix.
    #[error(
        "-context-path={path} is not a valid context path. \
         Braces are not allowed and no path segment may start with ':' or '*'"
    )]
    InvalidContextPath {
        /// Normalised path that was rejected.
        path: String,
    },

    /// The local host name could not be resolved to an address.
    #[error("Failed to get the localhost")]
    LocalHostUnresolved,

    /// The embedded H2 database server is not listening.
    #[error(
        "Failed to connect h2 db. Please run the h2 TcpServer in advance\n\
         or set the correct -database-host and -database-port parameters"
    )]
    EmbeddedDatabaseNotRunning {
        /// Database host that was probed.
        host: String,
        /// Database port that was probed.
        port: i64,
    },

    /// An external database could not be reached.
    #[error(
        "Failed to connect {database_type} db. Please run the {database_type} db in advance\n\
         or set the correct -database-host and -database-port parameters"
    )]
    DatabaseUnreachable {
        /// Configured database type.
        database_type: String,
        /// Database host that was probed.
        host: String,
        /// Database port that was probed.
        port: i64,
    },
}
