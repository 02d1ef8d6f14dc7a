//! A minimal HTTP server bootstrap.
//!
//! The crate wraps an axum server in a small lifecycle type: construct it
//! from a host and port, start it, and stop it gracefully. No routes are
//! registered; the server exists to be started and stopped cleanly, and
//! everything else is layered on by its users.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{Config, ServerConfig, Timeouts};
pub use error::{AppError, AppResult};
pub use server::{Server, ServerOptions, SHUTDOWN_GRACE_PERIOD};
