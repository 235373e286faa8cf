//! Prometheus metrics for the Store.
//!
//! The Store records through the `metrics` facade, which is a no-op until a
//! recorder is installed. [`MetricsExporter`] installs a Prometheus recorder
//! in-process so the collected values can be rendered as text.
//!
//! # Example
//!
//! ```rust,no_run
//! use clientdesk_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! // ... dispatch actions ...
//!
//! if let Some(text) = exporter.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Actions processed by the store
pub const COMMANDS_TOTAL: &str = "store.commands.total";

/// Time spent inside the reducer per action
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Effects returned by the reducer per action
pub const EFFECTS_COUNT: &str = "store.effects.count";

/// Effects executed, labelled by `type`
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// In-process Prometheus exporter.
#[derive(Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Create an exporter that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe the store metrics and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or another recorder is
    /// already installed in this process.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_001, 0.000_01, 0.000_1, 0.001, 0.01, 0.1],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        let handle = builder
            .install_recorder()
            .map_err(|e| MetricsError::Install(e.to_string()))?;

        register_metrics();
        self.handle = Some(handle);
        tracing::info!("Prometheus metrics recorder installed");
        Ok(())
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if the exporter hasn't been installed.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register descriptions for every metric the Store records.
///
/// Descriptions are attached to whichever recorder is installed, so call this
/// after installing one.
pub fn register_metrics() {
    describe_counter!(COMMANDS_TOTAL, "Total number of actions sent to the store");
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Time taken by the reducer to process one action"
    );
    describe_histogram!(EFFECTS_COUNT, "Number of effects returned per action");
    describe_counter!(EFFECTS_EXECUTED, "Total number of effects executed, by type");
}
