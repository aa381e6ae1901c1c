use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use neovideo_api::http::{create_router, AppState};
use neovideo_core::{bootstrap::Services, Config};

/// Neovideo HTTP server: owns the services and the listener task.
pub struct NeovideoServer {
    config: Arc<Config>,
    services: Services,
    http_handle: Option<JoinHandle<()>>,
}

impl NeovideoServer {
    #[must_use]
    pub fn new(config: Config, services: Services) -> Self {
        Self {
            config: Arc::new(config),
            services,
            http_handle: None,
        }
    }

    /// Start the HTTP server and wait for a shutdown signal
    pub async fn start(mut self) -> anyhow::Result<()> {
        info!("Starting neovideo server...");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let http_handle = self.start_http_server(shutdown_rx).await?;
        self.http_handle = Some(http_handle);

        let http_handle = self
            .http_handle
            .take()
            .ok_or_else(|| anyhow::anyhow!("HTTP server handle missing after startup"))?;

        tokio::select! {
            _ = http_handle => {
                error!("HTTP server stopped unexpectedly");
            }
            () = shutdown_signal() => {
                info!("Shutdown signal received, starting graceful shutdown...");
            }
        }

        let _ = shutdown_tx.send(true);
        self.shutdown();

        Ok(())
    }

    fn shutdown(&self) {
        info!("Shutting down neovideo server...");
        self.services.vod.stop_cache_cleanup();
        info!("Neovideo server shutdown complete");
    }

    async fn start_http_server(
        &self,
        shutdown_rx: watch::Receiver<bool>,
    ) -> anyhow::Result<JoinHandle<()>> {
        let http_address = self.config.http_address();
        let http_addr: std::net::SocketAddr = http_address
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid HTTP address '{http_address}': {e}"))?;

        // Bind before spawning so a busy port fails startup instead of the task
        let listener = tokio::net::TcpListener::bind(http_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind HTTP address {http_addr}: {e}"))?;
        info!("HTTP server listening on {}", http_addr);

        let http_router = create_router(AppState::from(self.services.clone()));

        let handle = tokio::spawn(async move {
            let mut rx = shutdown_rx;
            let graceful = async move {
                let _ = rx.changed().await;
            };

            if let Err(e) = axum::serve(listener, http_router)
                .with_graceful_shutdown(graceful)
                .await
            {
                error!("HTTP server error: {}", e);
            }

            info!("HTTP server shut down gracefully");
        });

        Ok(handle)
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C signal");
            }
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received SIGTERM signal");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
