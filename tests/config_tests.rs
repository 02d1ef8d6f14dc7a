//! Configuration tests.
//!
//! These tests verify configuration defaults and environment value parsing.

use plinth::config::{Config, ServerConfig, Timeouts, PHASE_TIMEOUT};
use std::time::Duration;

/// Test module for configuration defaults
mod default_tests {
    use super::*;

    #[test]
    fn test_server_config_defaults_to_loopback() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_config_default_nests_server_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, ServerConfig::default().host);
        assert_eq!(config.server.port, ServerConfig::default().port);
    }

    #[test]
    fn test_phase_timeout_value() {
        assert_eq!(PHASE_TIMEOUT, Duration::from_secs(5));
    }

    #[test]
    fn test_request_deadline_defaults_to_phase_timeout() {
        assert_eq!(Timeouts::default().request_deadline(), PHASE_TIMEOUT);
    }
}

/// Test module for environment value parsing
mod env_parsing_tests {
    use super::*;
    use plinth::error::AppError;
    use std::env;

    #[test]
    fn test_port_parsing() {
        let port: u16 = "8080".parse().expect("should parse");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_out_of_range_port_parsing() {
        let result: Result<u16, _> = "70000".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_parsing() {
        let result: Result<u16, _> = "not-a-port".parse();
        assert!(result.is_err());
    }

    // Environment variables are process-global, so every case runs in
    // this one test rather than racing across parallel tests.
    #[test]
    fn test_from_env_defaults_overrides_and_bad_port() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env().expect("should load defaults");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SERVER_PORT", "9090");

        let config = Config::from_env().expect("should load overrides");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);

        env::set_var("SERVER_PORT", "not-a-port");

        let err = Config::from_env().expect_err("should reject a bad port");
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("Invalid SERVER_PORT"));

        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");
    }
}
