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

//! Bootstrap integration tests.
//!
//! Drive the full two-pass parse, cluster mode resolution and override
//! merge from raw tokens, with a scripted network probe.

mod common;

use common::{bootstrapper, tokens, ScriptedProbe};
use ngrinder_core::properties::keys;
use ngrinder_core::{ClusterModeName, ConfigError, HomeHints};
use ngrinder_starter::{Bootstrap, BootstrapConfig, BootstrapError, Bootstrapper};
use std::path::PathBuf;

async fn ready(args: &[&str], probe: &ScriptedProbe) -> BootstrapConfig {
    match bootstrapper().bootstrap(&tokens(args), probe).await {
        Ok(Bootstrap::Ready(config)) => config,
        other => panic!("expected a ready configuration, got {other:?}"),
    }
}

async fn failure(args: &[&str], probe: &ScriptedProbe) -> (ConfigError, String) {
    match bootstrapper().bootstrap(&tokens(args), probe).await {
        Err(BootstrapError::Config { source, usage }) => (source, usage),
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_defaults() {
    let config = ready(&[], &ScriptedProbe::default()).await;

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.context_path, "/");
    assert_eq!(config.cluster_mode.name(), ClusterModeName::None);
    assert_eq!(config.home, PathBuf::from("/home/tester/.ngrinder"));
    assert_eq!(
        config.properties.get(keys::HOME),
        Some("/home/tester/.ngrinder")
    );
}

#[tokio::test]
async fn test_help_short_circuits() {
    let probe = ScriptedProbe::default();
    for flag in ["-help", "-?"] {
        // The bogus mode would fail if anything after help ran.
        let result = bootstrapper()
            .bootstrap(&tokens(&[flag, "-cluster-mode=bogus"]), &probe)
            .await
            .unwrap();

        let Bootstrap::Help(usage) = &result else {
            panic!("expected help, got {result:?}");
        };
        assert!(usage.contains("-port"), "{usage}");
        assert!(usage.contains("-cluster-mode"), "{usage}");
    }
}

#[tokio::test]
async fn test_unknown_cluster_mode_is_fatal() {
    let (err, usage) = failure(&["-cluster-mode=bogus"], &ScriptedProbe::default()).await;

    assert_eq!(
        err,
        ConfigError::UnknownClusterMode {
            name: "bogus".to_string()
        }
    );
    assert!(usage.contains("-context-path"), "{usage}");
}

#[tokio::test]
async fn test_invalid_top_level_value() {
    let (err, usage) = failure(&["-port=abc"], &ScriptedProbe::default()).await;

    assert!(matches!(err, ConfigError::InvalidArguments { .. }));
    assert!(usage.contains("-port"), "{usage}");
}

#[tokio::test]
async fn test_context_path_gets_leading_slash() {
    let config = ready(&["-context-path=app", "-port=9000"], &ScriptedProbe::default()).await;

    assert_eq!(config.context_path, "/app");
    assert_eq!(config.http_port, 9000);
}

#[tokio::test]
async fn test_context_path_with_route_syntax_rejected() {
    for (raw, normalized) in [("app{", "/app{"), ("/{id}/", "/{id}"), ("/:app", "/:app")] {
        let arg = format!("-context-path={raw}");
        let (err, usage) = failure(&[arg.as_str()], &ScriptedProbe::default()).await;

        assert_eq!(
            err,
            ConfigError::InvalidContextPath {
                path: normalized.to_string()
            }
        );
        assert!(usage.contains("-context-path"), "{usage}");
    }
}

#[tokio::test]
async fn test_unrecognized_tokens_reach_cluster_mode() {
    let config = ready(
        &["-controller-port=16001", "-port=9000"],
        &ScriptedProbe::default(),
    )
    .await;

    assert_eq!(config.properties.get(keys::CONTROLLER_PORT), Some("16001"));
}

#[tokio::test]
async fn test_easy_mode_flag_rejected_in_none_mode() {
    let (err, usage) = failure(&["-region=NA"], &ScriptedProbe::default()).await;

    assert!(matches!(err, ConfigError::InvalidArguments { .. }));
    assert!(usage.contains("-controller-port"), "{usage}");
}

#[tokio::test]
async fn test_easy_mode_occupied_cluster_port() {
    let probe = ScriptedProbe::default().occupied(10010);
    let (err, usage) = failure(
        &[
            "-cluster-mode=easy",
            "-cluster-port=10010",
            "-controller-port=16001",
            "-region=NA",
        ],
        &probe,
    )
    .await;

    assert!(matches!(err, ConfigError::PortOccupied { value: 10010, .. }));
    assert!(usage.contains("ngrinder -cluster-mode=easy"), "{usage}");
    assert_eq!(probe.reachability_checks(), 0);
}

#[tokio::test]
async fn test_easy_mode_h2_not_running() {
    let probe = ScriptedProbe::default();
    let (err, usage) = failure(
        &[
            "-cluster-mode=easy",
            "-cluster-port=10010",
            "-controller-port=16001",
            "-region=NA",
            "-database-type=h2",
        ],
        &probe,
    )
    .await;

    assert!(matches!(err, ConfigError::EmbeddedDatabaseNotRunning { ref host, port: 9092 } if host == "localhost"));
    assert!(err.to_string().contains("h2 TcpServer"));
    assert!(usage.contains("-database-port"), "{usage}");
    assert_eq!(probe.reachability_checks(), 1);
}

#[tokio::test]
async fn test_easy_mode_database_urls() {
    let probe = ScriptedProbe::default().reachable("db1", 3000);
    let base = [
        "-cluster-mode=easy",
        "-cluster-port=10010",
        "-controller-port=16001",
        "-region=NA",
        "-database-host=db1",
        "-database-port=3000",
    ];

    let mut cubrid = base.to_vec();
    cubrid.push("-database-type=cubrid");
    let config = ready(&cubrid, &probe).await;
    assert_eq!(config.properties.get(keys::DATABASE_URL), Some("db1:3000"));

    let mut h2 = base.to_vec();
    h2.push("-database-type=h2");
    let config = ready(&h2, &probe).await;
    assert_eq!(
        config.properties.get(keys::DATABASE_URL),
        Some("tcp://db1:3000/db/ngrinder")
    );
    assert_eq!(config.properties.get(keys::CLUSTER_MODE), Some("easy"));
}

#[tokio::test]
async fn test_overrides_win_over_cluster_mode() {
    let probe = ScriptedProbe::default().reachable("localhost", 9092);
    let config = ready(
        &[
            "-Ddatabase.url=jdbc:custom",
            "-cluster-mode=easy",
            "-cluster-port=10010",
            "-controller-port=16001",
            "-region=NA",
            "-Dcontroller.controller_port=17001",
            "-Dextra.flag=on",
        ],
        &probe,
    )
    .await;

    assert_eq!(config.properties.get(keys::DATABASE_URL), Some("jdbc:custom"));
    assert_eq!(config.properties.get(keys::CONTROLLER_PORT), Some("17001"));
    assert_eq!(config.properties.get("extra.flag"), Some("on"));
    assert_eq!(config.properties.get(keys::CLUSTER_PORT), Some("10010"));
}

#[tokio::test]
async fn test_advanced_mode_takes_no_flags() {
    let config = ready(&["-cluster-mode=advanced"], &ScriptedProbe::default()).await;
    assert_eq!(config.properties.get(keys::CLUSTER_MODE), Some("advanced"));

    let (err, usage) = failure(
        &["-cluster-mode=advanced", "-controller-port=16001"],
        &ScriptedProbe::default(),
    )
    .await;
    assert!(matches!(err, ConfigError::InvalidArguments { .. }));
    assert!(usage.contains("-cluster-mode=advanced"), "{usage}");
}

#[tokio::test]
async fn test_home_precedence() {
    let probe = ScriptedProbe::default();
    let with_env = Bootstrapper::new(
        "ngrinder",
        HomeHints {
            env: Some("/srv/env-home".to_string()),
            user_home: Some(PathBuf::from("/home/tester")),
            ..HomeHints::default()
        },
    );
    let home_of = |result: Result<Bootstrap, BootstrapError>| match result {
        Ok(Bootstrap::Ready(config)) => config.home,
        other => panic!("unexpected bootstrap result: {other:?}"),
    };

    let flag = with_env
        .bootstrap(&tokens(&["-home=/srv/flag-home", "-Dngrinder.home=/srv/prop"]), &probe)
        .await;
    assert_eq!(home_of(flag), PathBuf::from("/srv/flag-home"));

    let env = with_env
        .bootstrap(&tokens(&["-Dngrinder.home=/srv/prop"]), &probe)
        .await;
    assert_eq!(home_of(env), PathBuf::from("/srv/env-home"));

    let property = bootstrapper()
        .bootstrap(&tokens(&["-Dngrinder.home=/srv/prop"]), &probe)
        .await;
    assert_eq!(home_of(property), PathBuf::from("/srv/prop"));
}
