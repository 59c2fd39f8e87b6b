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

//! Port availability probe.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpSocket;
use tracing::debug;

/// Returns the port as `u16` when it lies in the valid TCP range.
pub fn port_in_range(port: i64) -> Option<u16> {
    u16::try_from(port).ok()
}

/// Checks whether a listening socket can be opened on `addr:port`.
///
/// When `addr` is `None` the probe binds on all interfaces. Out-of-range
/// ports are reported as unavailable without touching the network. The
/// probe socket is dropped before returning, so repeated calls never hold
/// a descriptor.
pub async fn is_bindable(addr: Option<IpAddr>, port: i64) -> bool {
    let Some(port) = port_in_range(port) else {
        debug!("Port {} is outside the TCP range", port);
        return false;
    };
    let ip = addr.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let target = SocketAddr::new(ip, port);

    let socket = match target {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    };
    let bound = socket
        .and_then(|socket| {
            socket.bind(target)?;
            socket.listen(1)
        })
        .is_ok();

    debug!("Bind probe on {} -> {}", target, bound);
    bound
}
