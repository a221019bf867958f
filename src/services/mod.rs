//! Services module for signing-stats.

pub mod aggregator;
pub mod database;
pub mod telemetry;

pub use aggregator::{aggregate, classify};
pub use database::Database;
pub use telemetry::{Reporter, Telemetry};
