//! Database service for signing-stats.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::SigningLogRecord;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(config), fields(service = "signing-stats"))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(host = %config.host, database = %config.name, "Connecting to MariaDB");

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        // One query per run, one connection is plenty.
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("MariaDB connection established");

        Ok(Self { pool })
    }

    /// Fetch the full signing log. Full-table scan, no filtering or ordering.
    #[instrument(skip(self))]
    pub async fn fetch_signing_log(&self) -> Result<Vec<SigningLogRecord>, AppError> {
        let records = sqlx::query_as::<_, SigningLogRecord>(
            "SELECT requester, revoked, expires FROM realm_signing_log",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Query failed: {}", e)))?;

        info!(rows = records.len(), "Fetched signing log");

        Ok(records)
    }
}
