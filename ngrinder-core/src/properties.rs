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

//! Process-wide configuration published by the bootstrap.

use std::collections::btree_map::{self, BTreeMap};

/// Well-known property keys read by the controller application.
pub mod keys {
    /// Agent connection port.
    pub const CONTROLLER_PORT: &str = "controller.controller_port";
    /// Active cluster mode (`easy` or `advanced`).
    pub const CLUSTER_MODE: &str = "cluster.mode";
    /// Cluster communication host of this member.
    pub const CLUSTER_HOST: &str = "cluster.ip";
    /// Cluster communication port of this member.
    pub const CLUSTER_PORT: &str = "cluster.port";
    /// Region this member belongs to.
    pub const CLUSTER_REGION: &str = "cluster.region";
    /// Database type (`h2`, `cubrid`, ...).
    pub const DATABASE_TYPE: &str = "database.type";
    /// Database connection string, shape depends on the type.
    pub const DATABASE_URL: &str = "database.url";
    /// Home directory hint.
    pub const HOME: &str = "ngrinder.home";
}

/// Ordered key/value configuration handed to the server.
///
/// Built once during bootstrap: cluster-mode entries first, operator
/// overrides last. Later writes replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Applies operator overrides on top of the current entries.
    ///
    /// Overrides always win over values derived by cluster-mode processing.
    pub fn merge_overrides<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            self.entries.insert(key.into(), value.into());
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
