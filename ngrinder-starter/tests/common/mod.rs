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

//! Shared helpers for starter integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ngrinder_core::{HomeHints, NetworkProbe};
use ngrinder_starter::Bootstrapper;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Probe with a fixed set of occupied ports and reachable endpoints.
#[derive(Default)]
pub struct ScriptedProbe {
    occupied: HashSet<i64>,
    reachable: HashSet<(String, i64)>,
    reachability_checks: AtomicUsize,
}

impl ScriptedProbe {
    pub fn occupied(mut self, port: i64) -> Self {
        self.occupied.insert(port);
        self
    }

    pub fn reachable(mut self, host: &str, port: i64) -> Self {
        self.reachable.insert((host.to_string(), port));
        self
    }

    pub fn reachability_checks(&self) -> usize {
        self.reachability_checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkProbe for ScriptedProbe {
    async fn local_host(&self) -> Option<IpAddr> {
        Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }

    async fn is_bindable(&self, _addr: Option<IpAddr>, port: i64) -> bool {
        !self.occupied.contains(&port)
    }

    async fn is_reachable(&self, host: &str, port: i64, _timeout: Duration) -> bool {
        self.reachability_checks.fetch_add(1, Ordering::SeqCst);
        self.reachable.contains(&(host.to_string(), port))
    }
}

/// Bootstrapper with a fixed user home and no environment hint.
pub fn bootstrapper() -> Bootstrapper {
    Bootstrapper::new(
        "ngrinder",
        HomeHints {
            user_home: Some(PathBuf::from("/home/tester")),
            ..HomeHints::default()
        },
    )
}

pub fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
