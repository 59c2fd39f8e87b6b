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

//! Parameters of the `easy` cluster mode.
//!
//! Easy mode members share one database. Besides the listen ports, the
//! bootstrap checks that the database accepts connections before the
//! controller starts, and publishes a database URL whose shape depends on
//! the database type.

use super::validate::validate_listen_port;
use crate::error::ConfigError;
use crate::probe::{NetworkProbe, CONNECT_TIMEOUT};
use crate::properties::{keys, Properties};
use clap::Parser;
use tracing::{error, info};

/// Default database port (H2 TCP server).
pub const DEFAULT_DATABASE_PORT: i64 = 9092;

/// Default database type.
pub const DEFAULT_DATABASE_TYPE: &str = "h2";

/// Cluster coordinated through a shared database.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct EasyModeArgs {
    /// This cluster member's cluster communication host. The default value is the
    /// first non-localhost address. If it's localhost, it can only communicate with
    /// the other cluster members in the same machine.
    #[arg(long = "cluster-host", require_equals = true)]
    pub cluster_host: Option<String>,

    /// This cluster member's cluster communication port. Each cluster member
    /// should have a unique port.
    #[arg(long = "cluster-port", require_equals = true)]
    pub cluster_port: i64,

    /// This cluster member's agent connection port
    #[arg(long = "controller-port", require_equals = true)]
    pub controller_port: i64,

    /// This cluster member's region name
    #[arg(long, require_equals = true)]
    pub region: String,

    /// The database host. The default value is localhost
    #[arg(long = "database-host", require_equals = true, default_value = "localhost")]
    pub database_host: String,

    /// The database port. The default value is 9092
    #[arg(
        long = "database-port",
        require_equals = true,
        default_value_t = DEFAULT_DATABASE_PORT
    )]
    pub database_port: i64,

    /// The database type. The default value is h2
    #[arg(
        long = "database-type",
        require_equals = true,
        default_value = DEFAULT_DATABASE_TYPE,
        hide = true
    )]
    pub database_type: String,
}

/// How the configured database is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// H2 running as a TCP server next to the controllers.
    Embedded,
    /// Any other database type, reached as `host:port`.
    External,
}

impl DatabaseKind {
    /// Classifies a `-database-type` value (exact match on `h2`).
    pub fn of(database_type: &str) -> Self {
        if database_type == DEFAULT_DATABASE_TYPE {
            Self::Embedded
        } else {
            Self::External
        }
    }

    /// Connection string the controller expects for this kind.
    pub fn url(self, host: &str, port: i64) -> String {
        match self {
            Self::Embedded => format!("tcp://{host}:{port}/db/ngrinder"),
            Self::External => format!("{host}:{port}"),
        }
    }
}

impl EasyModeArgs {
    pub(crate) async fn validate(&self, probe: &dyn NetworkProbe) -> Result<(), ConfigError> {
        validate_listen_port(probe, "-cluster-port", self.cluster_port).await?;
        validate_listen_port(probe, "-controller-port", self.controller_port).await?;
        Ok(())
    }

    pub(crate) async fn process(&self, probe: &dyn NetworkProbe) -> Result<Properties, ConfigError> {
        let mut props = Properties::new();
        props.set(keys::CLUSTER_MODE, "easy");
        if let Some(host) = &self.cluster_host {
            props.set(keys::CLUSTER_HOST, host);
        }
        props.set(keys::CLUSTER_PORT, self.cluster_port);
        props.set(keys::CLUSTER_REGION, &self.region);
        props.set(keys::CONTROLLER_PORT, self.controller_port);
        props.set(keys::DATABASE_TYPE, &self.database_type);

        let kind = DatabaseKind::of(&self.database_type);
        let (host, port) = (self.database_host.as_str(), self.database_port);
        if !probe.is_reachable(host, port, CONNECT_TIMEOUT).await {
            error!("{} database at {}:{} is not reachable", self.database_type, host, port);
            return Err(match kind {
                DatabaseKind::Embedded => ConfigError::EmbeddedDatabaseNotRunning {
                    host: host.to_string(),
                    port,
                },
                DatabaseKind::External => ConfigError::DatabaseUnreachable {
                    database_type: self.database_type.clone(),
                    host: host.to_string(),
                    port,
                },
            });
        }

        let url = kind.url(host, port);
        info!("Easy cluster member in region '{}' using database {}", self.region, url);
        props.set(keys::DATABASE_URL, url);
        Ok(props)
    }
}
