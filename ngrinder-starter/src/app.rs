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

//! Embedded HTTP server lifecycle.
//!
//! This module handles:
//! - Serving the controller bundle under the context path
//! - Starting, stopping and joining the server
//! - Waiting for an operator shutdown request

use crate::config::BootstrapConfig;
use anyhow::{bail, Context, Result};
use axum::http::StatusCode;
use axum::Router;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Notify};
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Per-request deadline, kept long so debugging sessions are not cut off.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Byte on standard input that requests shutdown.
pub const QUIT_KEY: u8 = b'q';

/// Builds the router serving `bundle` under `context_path`.
pub fn create_router(context_path: &str, bundle: &Path) -> Router {
    let webapp = ServeDir::new(bundle).append_index_html_on_directories(true);
    let router = if context_path == "/" {
        Router::new().fallback_service(webapp)
    } else {
        Router::new().nest_service(context_path, webapp)
    };
    router
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// Owns the embedded server for the lifetime of the process.
pub struct ServerLifecycle {
    config: BootstrapConfig,
    bundle: PathBuf,
}

impl ServerLifecycle {
    /// Creates a lifecycle for `config`, serving the bundle at `bundle`.
    pub fn new(config: BootstrapConfig, bundle: PathBuf) -> Self {
        Self { config, bundle }
    }

    /// Starts the server.
    ///
    /// Creates the home directory if needed, then binds the HTTP port on all
    /// interfaces. Fails if the bundle is missing or the port is taken.
    pub async fn start(&self) -> Result<RunningServer> {
        let config = &self.config;

        tokio::fs::create_dir_all(&config.home)
            .await
            .with_context(|| format!("Failed to create home directory {}", config.home.display()))?;
        info!("Home directory: {}", config.home.display());

        let is_dir = tokio::fs::metadata(&self.bundle)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            bail!("Web application bundle not found at {}", self.bundle.display());
        }
        info!("Web application bundle: {}", self.bundle.display());

        for (key, value) in &config.properties {
            debug!("Property {}={}", key, value);
        }

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port));
        // Sockets keep the OS default of no linger-on-close.
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind HTTP port {}", config.http_port))?;
        let local_addr = listener.local_addr()?;

        let router = create_router(&config.context_path, &self.bundle);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        info!("Listening on http://{}{}", local_addr, config.context_path);
        Ok(RunningServer {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    /// Starts the server, waits for a quit request on standard input or a
    /// termination signal, then stops and joins the server.
    pub async fn run(&self, trigger: &ShutdownTrigger) -> Result<()> {
        let mut server = self.start().await?;
        info!("Press '{}' and Enter to stop the server", char::from(QUIT_KEY));

        let reason = wait_for_quit(tokio::io::stdin(), trigger).await;
        info!("Received {}, starting graceful shutdown...", reason);

        server.stop();
        server.join().await
    }
}

/// Handle of a started server.
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the server listens on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Asks the server to stop accepting connections and drain.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            // The server may already be gone; join reports why.
            let _ = tx.send(());
        }
    }

    /// Waits for the server to finish.
    pub async fn join(self) -> Result<()> {
        self.task
            .await
            .context("Server task panicked")?
            .context("Server terminated with an error")?;
        info!("Server shutdown complete");
        Ok(())
    }
}

/// Explicit shutdown request, usable from any task.
#[derive(Debug, Clone, Default)]
pub struct ShutdownTrigger {
    notify: Arc<Notify>,
}

impl ShutdownTrigger {
    /// Creates a trigger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. A request made before anyone waits is kept.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    async fn triggered(&self) {
        self.notify.notified().await;
    }
}

/// Why the server is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitReason {
    /// The quit key was read from standard input.
    QuitKey,
    /// Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// [`ShutdownTrigger::trigger`] was called.
    Trigger,
}

impl fmt::Display for QuitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::QuitKey => "quit key",
            Self::Interrupt => "Ctrl+C",
            Self::Terminate => "terminate signal",
            Self::Trigger => "shutdown request",
        })
    }
}

/// Waits until `input` yields the quit key, a termination signal arrives,
/// or `trigger` fires.
///
/// When `input` reaches end of file it is no longer read; the other
/// sources still apply.
pub async fn wait_for_quit<R>(input: R, trigger: &ShutdownTrigger) -> QuitReason
where
    R: AsyncRead + Unpin,
{
    tokio::select! {
        () = read_quit_key(input) => QuitReason::QuitKey,
        () = trigger.triggered() => QuitReason::Trigger,
        reason = termination_signal() => reason,
    }
}

/// Completes once the quit key is read. Never completes after end of input.
async fn read_quit_key<R>(mut input: R)
where
    R: AsyncRead + Unpin,
{
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte).await {
            Ok(0) => {
                debug!("Standard input closed");
                break;
            }
            Ok(_) if byte[0] == QUIT_KEY => return,
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read standard input: {}", e);
                break;
            }
        }
    }
    std::future::pending::<()>().await;
}

async fn termination_signal() -> QuitReason {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => QuitReason::Interrupt,
        () = terminate => QuitReason::Terminate,
    }
}
