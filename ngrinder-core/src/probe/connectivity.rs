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

//! Remote reachability probe.

use super::port::port_in_range;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Connect timeout used for database reachability checks.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Checks whether a TCP connection to `host:port` can be established within `timeout`.
///
/// Refused connections, timeouts, unresolvable hosts and out-of-range ports
/// all yield `false`. A successful connection is closed immediately.
pub async fn is_reachable(host: &str, port: i64, timeout: Duration) -> bool {
    let Some(port) = port_in_range(port) else {
        debug!("Port {} is outside the TCP range", port);
        return false;
    };

    // Name resolution counts against the same deadline as the connect.
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            true
        }
        Ok(Err(e)) => {
            debug!("Connection to {}:{} failed: {}", host, port, e);
            false
        }
        Err(_) => {
            debug!("Connection to {}:{} timed out after {:?}", host, port, timeout);
            false
        }
    }
}
