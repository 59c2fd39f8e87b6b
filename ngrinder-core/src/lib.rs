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

//! nGrinder Core - startup configuration for the controller.
//!
//! This crate provides:
//! - Port and connectivity probes used as startup preconditions
//! - Cluster modes (`none`, `easy`, `advanced`) with their own parameter schemas
//! - The property set published to the controller
//! - Home directory resolution

pub mod args;
pub mod cluster;
pub mod error;
pub mod home;
pub mod probe;
pub mod properties;

pub use cluster::{ClusterMode, ClusterModeName};
pub use error::ConfigError;
pub use home::HomeHints;
pub use probe::{NetworkProbe, SocketProbe};
pub use properties::Properties;
