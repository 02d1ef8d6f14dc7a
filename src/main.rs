use clap::Parser;
use plinth::config::Config;
use plinth::error::AppResult;
use plinth::server::{Server, ServerOptions};
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

/// plinth - a minimal HTTP server bootstrap
#[derive(Parser, Debug)]
#[command(name = "plinth")]
#[command(version = "0.1.0")]
#[command(about = "A minimal HTTP server bootstrap", long_about = None)]
struct Cli {
    /// Host to bind to (overrides SERVER_HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides SERVER_PORT env var)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Override config with CLI args if provided
    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let server = Arc::new(Server::new(ServerOptions { host, port }));

    // The server registers no signal handlers itself; the binary wires
    // Ctrl+C and SIGTERM to `stop`.
    let stopper = Arc::clone(&server);
    tokio::spawn(async move {
        shutdown_signal().await;
        if let Err(e) = stopper.stop().await {
            error!("Shutdown failed: {}", e);
        }
    });

    server.start().await
}

/// Wait until a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails; without working signal
/// handlers the process cannot be asked to shut down gracefully.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
