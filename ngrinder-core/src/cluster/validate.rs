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

//! Listen-port validation shared by the cluster modes.

use crate::error::ConfigError;
use crate::probe::{port_in_range, NetworkProbe};
use tracing::warn;

/// Rejects `value` unless it is a valid port that can be bound on the local host.
///
/// `name` is the flag as the operator wrote it (e.g. `-cluster-port`).
pub async fn validate_listen_port(
    probe: &dyn NetworkProbe,
    name: &str,
    value: i64,
) -> Result<(), ConfigError> {
    if port_in_range(value).is_none() {
        return Err(ConfigError::PortOutOfRange {
            name: name.to_string(),
            value,
        });
    }

    let local_host = probe.local_host().await.ok_or(ConfigError::LocalHostUnresolved)?;
    if !probe.is_bindable(Some(local_host), value).await {
        warn!("{}={} cannot be bound on {}", name, value, local_host);
        return Err(ConfigError::PortOccupied {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}
