//! signing-stats: per-organisation signing-log statistics with OTLP gauge export.

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
