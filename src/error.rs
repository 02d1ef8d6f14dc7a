use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Server startup failed: {0}")]
    Startup(String),

    #[error("Server shutdown failed: {0}")]
    Shutdown(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
