//! Configuration module for signing-stats.

use crate::error::AppError;
use std::env;

/// Runtime configuration, sourced entirely from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host of the OTLP collector; the exporter targets `http://{host}:4317`.
    pub collector_host: String,
    /// Reported as the `service.name` resource attribute and used as the meter name.
    pub service_name: String,
    pub log_level: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

fn required(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::ConfigError(anyhow::anyhow!("{} is required", name)))
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            collector_host: required("ALLOY_HOST")?,
            service_name: required("SERVICE_NAME")?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            database: DatabaseConfig {
                host: required("DB_HOST")?,
                name: required("DB_NAME")?,
                user: required("DB_USER")?,
                password: required("DB_PASS")?,
            },
        })
    }
}
