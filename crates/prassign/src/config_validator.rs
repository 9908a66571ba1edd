//! Validation utilities.

use std::fmt::Write;

use prassign_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        write!(error, "  - Missing env. var.: {}", name).unwrap();
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        error.push('\n');
        write!(error, "  - Invalid env. var.: {} ({})", name, reason).unwrap();
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_PORT");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "PRASSIGN_DATABASE_PG_URL");
    }

    // Check assignment configuration
    if config.assignment.cascade_max_concurrency == 0 {
        _invalid(
            &mut error,
            "PRASSIGN_CASCADE_MAX_CONCURRENCY",
            "must be at least 1",
        );
    }

    if !(0.0..=1.0).contains(&config.sentry.traces_sample_rate) {
        _invalid(
            &mut error,
            "PRASSIGN_SENTRY_TRACES_SAMPLE_RATE",
            "must be between 0 and 1",
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
