//! signing-stats entry point.
//!
//! One-shot batch run: load config, query the signing log, aggregate,
//! print the JSON summary, export gauges, flush, exit.

use signing_stats::config::Config;
use signing_stats::error::AppError;
use signing_stats::models::SigningLogRecord;
use signing_stats::observability::init_logging;
use signing_stats::services::{aggregate, Database, Reporter, Telemetry};

use chrono::Local;

async fn fetch_records(config: &Config) -> Result<Vec<SigningLogRecord>, AppError> {
    let database = Database::connect(&config.database).await?;
    database.fetch_signing_log().await
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration; missing variables are fatal before any connection.
    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_logging(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        service_name = %config.service_name,
        collector_host = %config.collector_host,
        db_host = %config.database.host,
        db_name = %config.database.name,
        "Starting signing-stats run"
    );

    let telemetry = Telemetry::init(&config.collector_host, &config.service_name).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize telemetry");
        std::io::Error::other(format!("Telemetry error: {}", e))
    })?;

    // A failed connection or query is tolerated: the run still prints a
    // (possibly empty) summary and still flushes telemetry.
    let records = match fetch_records(&config).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Error retrieving entries from database");
            Vec::new()
        }
    };

    // Wall clock is sampled once so every record is judged against the same
    // instant. Local time, since the DATETIME column carries no zone.
    let now = Local::now().naive_local();
    let summaries = aggregate(records, now);

    tracing::info!(organisations = summaries.len(), "Aggregation complete");

    // The one JSON document on stdout; everything else logs to stderr.
    let document = serde_json::to_string(&summaries)
        .map_err(|e| std::io::Error::other(format!("Serialization error: {}", e)))?;
    println!("{}", document);

    let mut reporter = Reporter::new(telemetry.meter(config.service_name.clone()));
    reporter.publish(summaries);

    telemetry.shutdown().map_err(|e| {
        tracing::error!(error = %e, "Failed to flush telemetry");
        std::io::Error::other(format!("Telemetry error: {}", e))
    })?;

    tracing::info!("Run complete");
    Ok(())
}
