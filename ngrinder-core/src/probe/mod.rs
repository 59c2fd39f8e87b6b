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

//! Network probes that gate startup.
//!
//! Two opposite checks are used during bootstrap:
//! - [`is_bindable`]: can a listening socket be opened on a port right now?
//! - [`is_reachable`]: does a remote endpoint accept TCP connections?
//!
//! Both collapse every failure reason into `false`. Callers only decide
//! whether to start or not, so the probes never surface the underlying cause.

mod connectivity;
mod port;

pub use connectivity::{is_reachable, CONNECT_TIMEOUT};
pub use port::{is_bindable, port_in_range};

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Probe seam used by cluster-mode validation.
///
/// [`SocketProbe`] talks to the real network stack. Tests swap in a
/// scripted implementation so cluster-mode rules can be checked without
/// depending on host name resolution or remote services.
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    /// Address the local host name resolves to.
    async fn local_host(&self) -> Option<IpAddr>;

    /// Whether a listener can be bound to `port` on `addr` (all interfaces when `None`).
    async fn is_bindable(&self, addr: Option<IpAddr>, port: i64) -> bool;

    /// Whether a TCP connection to `host:port` succeeds within `timeout`.
    async fn is_reachable(&self, host: &str, port: i64, timeout: Duration) -> bool;
}

/// [`NetworkProbe`] backed by real sockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketProbe;

#[async_trait]
impl NetworkProbe for SocketProbe {
    async fn local_host(&self) -> Option<IpAddr> {
        resolve_local_host().await
    }

    async fn is_bindable(&self, addr: Option<IpAddr>, port: i64) -> bool {
        is_bindable(addr, port).await
    }

    async fn is_reachable(&self, host: &str, port: i64, timeout: Duration) -> bool {
        is_reachable(host, port, timeout).await
    }
}

/// Resolves the machine's host name to its first address.
pub async fn resolve_local_host() -> Option<IpAddr> {
    let name = hostname::get().ok()?.into_string().ok()?;
    let mut addrs = tokio::net::lookup_host((name.as_str(), 0)).await.ok()?;
    let addr = addrs.next().map(|addr| addr.ip());
    debug!("Local host {} resolved to {:?}", name, addr);
    addr
}
