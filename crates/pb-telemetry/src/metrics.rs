//! Prometheus metrics for the poll add-on.
//!
//! All metrics follow the naming convention: `pb_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ACTIVATION METRICS
    // =========================================================================

    /// Activation attempts by outcome (`activated`, `already_active`, `failed`, `rejected`)
    pub static ref ACTIVATION_ATTEMPTS: CounterVec = CounterVec::new(
        Opts::new("pb_activation_attempts_total", "Total activation attempts"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Activation failures by the stage that failed
    pub static ref ACTIVATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("pb_activation_failures_total", "Activation failures per stage"),
        &["stage"]
    ).expect("metric creation failed");

    // =========================================================================
    // REQUEST METRICS
    // =========================================================================

    /// Permission checks by decision (`creator`, `system_admin`, `denied`, `error`)
    pub static ref PERMISSION_CHECKS: CounterVec = CounterVec::new(
        Opts::new("pb_permission_checks_total", "Poll permission checks"),
        &["decision"]
    ).expect("metric creation failed");

    /// Display-name lookups that could not resolve the principal, by policy
    pub static ref NAME_RESOLUTION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("pb_name_resolution_failures_total", "Unresolvable principals"),
        &["policy"]
    ).expect("metric creation failed");

    /// Ephemeral notifications that were not delivered
    pub static ref EPHEMERAL_POSTS_DROPPED: Counter = Counter::new(
        "pb_ephemeral_posts_dropped_total",
        "Ephemeral posts dropped because sending failed or the add-on was inactive"
    ).expect("metric creation failed");
}

/// Handle to the registry; held by the telemetry guard.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; already registered metrics are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Activation
        Box::new(ACTIVATION_ATTEMPTS.clone()),
        Box::new(ACTIVATION_FAILURES.clone()),
        // Requests
        Box::new(PERMISSION_CHECKS.clone()),
        Box::new(NAME_RESOLUTION_FAILURES.clone()),
        Box::new(EPHEMERAL_POSTS_DROPPED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_twice_is_ok() {
        assert!(register_metrics().is_ok());
        assert!(register_metrics().is_ok());
    }

    #[test]
    fn test_encode_contains_counters() {
        register_metrics().unwrap();
        ACTIVATION_ATTEMPTS.with_label_values(&["activated"]).inc();
        EPHEMERAL_POSTS_DROPPED.inc();

        let text = encode_metrics().unwrap();
        assert!(text.contains("pb_activation_attempts_total"));
        assert!(text.contains("pb_ephemeral_posts_dropped_total"));
    }
}
