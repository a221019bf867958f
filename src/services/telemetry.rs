//! OTLP metric export for signing-stats.
//!
//! The meter provider is owned explicitly by the caller rather than installed
//! as a process-global, so the flush at end of run is a visible part of the
//! program flow.

use crate::error::AppError;
use crate::models::OrganizationSummary;
use opentelemetry::metrics::{AsyncInstrument, Meter, MeterProvider, ObservableGauge};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::{runtime, Resource};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Owns the OTLP meter provider for one run.
pub struct Telemetry {
    provider: SdkMeterProvider,
}

impl Telemetry {
    /// Build an OTLP/gRPC metric pipeline targeting `http://{collector_host}:4317`.
    pub fn init(collector_host: &str, service_name: &str) -> Result<Self, AppError> {
        let exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(format!("http://{}:4317", collector_host));

        let provider = opentelemetry_otlp::new_pipeline()
            .metrics(runtime::Tokio)
            .with_exporter(exporter)
            .with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                service_name.to_string(),
            )]))
            .build()
            .map_err(|e| {
                AppError::TelemetryError(anyhow::anyhow!(
                    "Failed to initialize OTLP meter provider: {}",
                    e
                ))
            })?;

        Ok(Self { provider })
    }

    pub fn meter(&self, name: impl Into<Cow<'static, str>>) -> Meter {
        self.provider.meter(name)
    }

    /// Flush buffered observations and tear the pipeline down.
    pub fn shutdown(self) -> Result<(), AppError> {
        self.provider
            .force_flush()
            .map_err(|e| AppError::TelemetryError(anyhow::anyhow!("Flush failed: {}", e)))?;
        self.provider
            .shutdown()
            .map_err(|e| AppError::TelemetryError(anyhow::anyhow!("Shutdown failed: {}", e)))
    }
}

/// Publishes per-organisation summaries as gauge observations.
///
/// Five gauges, each observed once per organisation with an `organisation`
/// attribute. The reporter only registers observations; flush timing belongs
/// to the meter provider.
pub struct Reporter {
    meter: Meter,
    gauges: Vec<ObservableGauge<u64>>,
}

impl Reporter {
    pub fn new(meter: Meter) -> Self {
        Self {
            meter,
            gauges: Vec::new(),
        }
    }

    /// Register gauge callbacks over the summary map. An empty map registers
    /// no instruments at all.
    pub fn publish(&mut self, summaries: BTreeMap<String, OrganizationSummary>) {
        if summaries.is_empty() {
            return;
        }

        let summaries = Arc::new(summaries);
        self.gauges = vec![
            self.gauge("users_active", "active_users", &summaries, |s| {
                s.users.active
            }),
            self.gauge("users_inactive", "inactive_users", &summaries, |s| {
                s.users.inactive
            }),
            self.gauge("profiles_expired", "expired_profiles", &summaries, |s| {
                s.profiles.expired
            }),
            self.gauge("profiles_active", "active_profiles", &summaries, |s| {
                s.profiles.active
            }),
            self.gauge("profiles_revoked", "revoked_profiles", &summaries, |s| {
                s.profiles.revoked
            }),
        ];
    }

    fn gauge(
        &self,
        name: &'static str,
        description: &'static str,
        summaries: &Arc<BTreeMap<String, OrganizationSummary>>,
        value: fn(&OrganizationSummary) -> u64,
    ) -> ObservableGauge<u64> {
        let summaries = Arc::clone(summaries);
        self.meter
            .u64_observable_gauge(name)
            .with_description(description)
            .with_callback(move |observer: &dyn AsyncInstrument<u64>| {
                for (org, summary) in summaries.iter() {
                    observer.observe(
                        value(summary),
                        &[KeyValue::new("organisation", org.clone())],
                    );
                }
            })
            .init()
    }
}
