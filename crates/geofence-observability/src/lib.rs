//! Process-wide logging and metrics export for geofence services.

use geofence_config::ServiceConfig;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

const FALLBACK_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
    pub metrics_addr: Option<String>,
}

impl From<&ServiceConfig> for ObservabilityConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            environment: config.environment.to_string(),
            log_level: config.log_level.clone(),
            metrics_addr: config.metrics_addr.clone(),
        }
    }
}

/// Where metrics end up after `init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsExport {
    /// No listener address configured.
    Disabled,
    InvalidAddress(String),
    Listening(SocketAddr),
    InstallFailed(SocketAddr),
}

impl MetricsExport {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Listening(_))
    }
}

#[derive(Debug, Clone)]
pub struct Observability {
    pub service_name: String,
    pub environment: String,
    /// Filter directive actually in effect.
    pub log_filter: String,
    pub metrics: MetricsExport,
}

/// Installs the stderr tracing subscriber and, when configured, the
/// Prometheus listener. Stdout is left to the event stream.
pub fn init(config: &ObservabilityConfig) -> Observability {
    let (filter, log_filter) = log_filter(&config.log_level);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    let metrics = match resolve_metrics_addr(config.metrics_addr.as_deref()) {
        MetricsExport::Listening(addr) => install_prometheus(config, addr),
        other => other,
    };
    if let MetricsExport::InvalidAddress(value) = &metrics {
        tracing::warn!(value = %value, "GEOFENCE_METRICS_ADDR is not a socket address");
    }

    Observability {
        service_name: config.service_name.clone(),
        environment: config.environment.clone(),
        log_filter,
        metrics,
    }
}

pub fn log_startup(observability: &Observability, session_policy: &str) {
    tracing::info!(
        service = %observability.service_name,
        environment = %observability.environment,
        log_filter = %observability.log_filter,
        session_policy = %session_policy,
        metrics = ?observability.metrics,
        "geofence service starting"
    );
}

fn log_filter(level: &str) -> (EnvFilter, String) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, level.to_string()),
        Err(_) => (EnvFilter::new(FALLBACK_FILTER), FALLBACK_FILTER.to_string()),
    }
}

fn resolve_metrics_addr(value: Option<&str>) -> MetricsExport {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return MetricsExport::Disabled;
    };
    match value.parse::<SocketAddr>() {
        Ok(addr) => MetricsExport::Listening(addr),
        Err(_) => MetricsExport::InvalidAddress(value.to_string()),
    }
}

fn install_prometheus(config: &ObservabilityConfig, addr: SocketAddr) -> MetricsExport {
    let installed = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", config.service_name.clone())
        .add_global_label("environment", config.environment.clone())
        .install();
    match installed {
        Ok(()) => MetricsExport::Listening(addr),
        Err(err) => {
            tracing::warn!(addr = %addr, error = %err, "Prometheus exporter not installed");
            MetricsExport::InstallFailed(addr)
        }
    }
}
