//! Prometheus metrics exposition
//!
//! Counters emitted by this service:
//!
//! - `oauth_token_exchanges_total` (counter): labels `grant_type`,
//!   `outcome`; recorded by the token service on every exchange
//! - `crm_contact_fetches_total` (counter): label `outcome`; recorded by
//!   the contact-serving handlers

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
///
/// The handle's `render()` method produces the Prometheus text exposition
/// format suitable for serving on a `/metrics` endpoint.
pub fn install_recorder() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

/// Record a contact fetch attempt against the CRM API.
pub fn record_contact_fetch(outcome: &'static str) {
    metrics::counter!("crm_contact_fetches_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_functions_do_not_panic_without_recorder() {
        // When no recorder is installed, metrics calls are no-ops.
        record_contact_fetch("ok");
        record_contact_fetch("error");
    }

    #[test]
    fn isolated_recorder_renders_recorded_counter() {
        // build_recorder() avoids the global-recorder singleton constraint
        // so this test can run alongside others in the same process.
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_contact_fetch("ok");
        });

        let rendered = handle.render();
        assert!(
            rendered.contains("crm_contact_fetches_total"),
            "rendered output missing counter:\n{rendered}"
        );
    }
}
