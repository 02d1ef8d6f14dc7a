//! Server lifecycle management.
//!
//! This module contains the [`Server`] type, which owns the listener
//! lifecycle:
//! - Construction from a host and port
//! - Binding and serving until asked to stop
//! - Graceful shutdown with a bounded grace period
//!
//! Signal handling is deliberately left to the caller. The server only
//! reacts to [`Server::stop`], so a binary can wire whatever triggers it
//! wants (signals, admin endpoints, test harnesses) to the same method.

use crate::config::Timeouts;
use crate::error::{AppError, AppResult};
use crate::routes;
use axum::Router;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How long [`Server::stop`] waits for in-flight connections to drain
/// before terminating them.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Options for constructing a [`Server`].
#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub host: String,
    pub port: u16,
}

#[repr(u8)]
enum Lifecycle {
    Constructed = 0,
    Listening = 1,
    Stopped = 2,
}

/// An HTTP server with a managed start/stop lifecycle.
///
/// A server moves through three states: constructed, listening, stopped.
/// Stopped is terminal; a server cannot be restarted. Both [`Server::start`]
/// and [`Server::stop`] take `&self`, so callers share one instance behind
/// an `Arc` and drive the two halves of the lifecycle from different tasks.
pub struct Server {
    address: String,
    router: Router,
    timeouts: Timeouts,
    state: AtomicU8,
    shutdown: CancellationToken,
    force: CancellationToken,
    stopped: CancellationToken,
    local_addr: OnceLock<SocketAddr>,
}

impl Server {
    /// Create a server that will bind `host:port` when started.
    ///
    /// Construction is infallible and performs no I/O. The address is not
    /// resolved or validated until [`Server::start`] binds it.
    pub fn new(options: ServerOptions) -> Self {
        let address = join_host_port(&options.host, options.port);
        let timeouts = Timeouts::default();
        let router = routes::create_router(&timeouts);

        Self {
            address,
            router,
            timeouts,
            state: AtomicU8::new(Lifecycle::Constructed as u8),
            shutdown: CancellationToken::new(),
            force: CancellationToken::new(),
            stopped: CancellationToken::new(),
            local_addr: OnceLock::new(),
        }
    }

    /// The address the server was configured with, in `host:port` form.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The socket address actually bound, available once the server is
    /// listening. Useful when the configured port is 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr.get().copied()
    }

    /// The per-connection timing bounds the server enforces.
    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Bind the configured address and serve requests until stopped.
    ///
    /// Blocks until the server has shut down. Returns `Ok(())` when the
    /// shutdown was initiated by [`Server::stop`], including when the grace
    /// period expired and remaining connections were terminated; the
    /// `stop` call reports that failure.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Startup`] if the address cannot be bound, if the
    /// accept loop fails, or if the server was already started. A failed
    /// start leaves the server stopped; it cannot be started again.
    pub async fn start(&self) -> AppResult<()> {
        self.transition_to_listening()?;

        let result = self.serve().await;

        self.state.store(Lifecycle::Stopped as u8, Ordering::SeqCst);
        self.stopped.cancel();

        result
    }

    async fn serve(&self) -> AppResult<()> {
        info!("Server starting on {}", self.address);

        let listener = TcpListener::bind(&self.address)
            .await
            .map_err(|e| AppError::Startup(format!("failed to bind {}: {}", self.address, e)))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| AppError::Startup(format!("failed to read local address: {}", e)))?;
        let _ = self.local_addr.set(local_addr);

        info!("Server listening on {}", local_addr);

        let serve = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(self.shutdown.clone().cancelled_owned())
            .into_future();

        tokio::select! {
            result = serve => {
                result.map_err(|e| AppError::Startup(format!("server error: {}", e)))?;
            }
            _ = self.force.cancelled() => {
                warn!("Grace period expired, terminating remaining connections");
            }
        }

        Ok(())
    }

    /// Gracefully stop a listening server.
    ///
    /// Stops accepting new connections and waits up to
    /// [`SHUTDOWN_GRACE_PERIOD`] for in-flight connections to drain. If the
    /// grace period expires, remaining connections are terminated and an
    /// error is returned. Either way the server ends up stopped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Shutdown`] if the server was never started, has
    /// already stopped, or did not drain within the grace period.
    pub async fn stop(&self) -> AppResult<()> {
        match self.lifecycle() {
            Lifecycle::Listening => {}
            Lifecycle::Constructed => {
                return Err(AppError::Shutdown("server was never started".to_string()));
            }
            Lifecycle::Stopped => {
                return Err(AppError::Shutdown("server already stopped".to_string()));
            }
        }

        info!("Server stopping");
        self.shutdown.cancel();

        match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, self.stopped.cancelled()).await {
            Ok(()) => {
                info!("Server stopped");
                Ok(())
            }
            Err(_) => {
                self.force.cancel();
                Err(AppError::Shutdown(format!(
                    "graceful shutdown did not complete within {:?}; remaining connections were terminated",
                    SHUTDOWN_GRACE_PERIOD
                )))
            }
        }
    }

    fn lifecycle(&self) -> Lifecycle {
        match self.state.load(Ordering::SeqCst) {
            s if s == Lifecycle::Constructed as u8 => Lifecycle::Constructed,
            s if s == Lifecycle::Listening as u8 => Lifecycle::Listening,
            _ => Lifecycle::Stopped,
        }
    }

    fn transition_to_listening(&self) -> AppResult<()> {
        match self.state.compare_exchange(
            Lifecycle::Constructed as u8,
            Lifecycle::Listening as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => Ok(()),
            Err(current) if current == Lifecycle::Listening as u8 => {
                Err(AppError::Startup("server is already running".to_string()))
            }
            Err(_) => Err(AppError::Startup("server has already stopped".to_string())),
        }
    }
}

/// Combine a host and port into a network address.
///
/// IPv6 literals are bracketed so the port separator stays unambiguous.
fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
