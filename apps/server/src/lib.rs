//! # CarGroup Server
//!
//! Axum server hosting the vehicle catalog and the regional purchase groups.
//!
//! ## Example
//! ```no_run
//! use cargroup_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(8001)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod listener;
mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use cargroup::domain::config::{ApiConfig, LoggingConfig};
use cargroup::features::groups::Groups;
use cargroup::kernel::server::ApiState;
use cargroup_event_bus::EventBus;
use cargroup_logger::{LevelFilter, Logger};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_DRAIN: Duration = Duration::from_secs(30);

/// Installs the global subscriber from the `[logging]` section.
///
/// # Errors
/// Fails on an unknown level name or when the logger cannot be installed.
pub fn init_logger(cfg: &LoggingConfig) -> Result<Logger> {
    let level: LevelFilter =
        cfg.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.level))?;

    let mut builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(level)
        .console(cfg.console)
        .json(cfg.json);
    if let Some(filter) = &cfg.env_filter {
        builder = builder.env_filter(filter.clone());
    }
    if let Some(path) = &cfg.path {
        builder = builder.path(path.clone());
    }

    builder.init().context("Failed to initialize logging")
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates the TLS files, if configured
    /// 2. Loads the catalog and wires the groups slice
    /// 3. Registers the slices in the application state
    /// 4. Runs one seeding pass when `groups.seed_on_startup` is set
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * The catalog cannot be loaded or fails validation
    /// * Startup seeding fails
    pub async fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let events = EventBus::new();
        let slices = cargroup::init(&self.cfg, &events)
            .map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let seed_on_startup = self.cfg.groups.seed_on_startup;
        let state = ApiState::builder()
            .config(self.cfg)
            .events(events)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;
        info!(
            slices = state.slice_count(),
            features = ?cargroup::features::ENABLED,
            "Feature slices registered"
        );

        if seed_on_startup {
            let groups = state.try_get_slice::<Groups>()?;
            let report = groups.seeding.seed_all().await.context("Startup seeding failed")?;
            info!(created = report.total_groups_created, "{}", report.message());
        }

        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The full HTTP application: `/health`, `/api/*`, `/openapi.json` and `/docs`.
    pub fn app(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(address = %address, ssl = cfg.server.ssl.is_some(), "Starting server");

        let listeners = listener::spawn(&self.state.events)
            .context("Failed to subscribe to group events")?;
        let app = self.app();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_DRAIN));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        let closed = self.state.events.shutdown();
        for task in listeners {
            if let Err(e) = task.await {
                warn!("Event listener ended abnormally: {e}");
            }
        }

        info!(channels = closed, "Server shutdown complete");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
