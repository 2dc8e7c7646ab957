use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;

static METRICS_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Global metrics instance.
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Metrics collector for the ledger.
#[derive(Debug, Clone, Default)]
pub struct Metrics;

impl Metrics {
    pub fn new() -> Self {
        Self
    }

    pub fn record_journal_posted(&self) {
        counter!("ledger_journals_posted_total").increment(1);
    }

    pub fn record_posting_rejected(&self, reason: &str) {
        counter!("ledger_postings_rejected_total", "reason" => reason.to_string()).increment(1);
    }

    pub fn record_posting_latency(&self, duration_ms: f64) {
        histogram!("ledger_posting_duration_ms").record(duration_ms);
    }

    pub fn record_balance_query_latency(&self, duration_ms: f64, row_count: u64) {
        histogram!("ledger_balance_query_duration_ms").record(duration_ms);
        histogram!("ledger_balance_rows").record(row_count as f64);
    }
}

/// Timer for measuring operation latency.
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the Prometheus recorder and returns its handle. Safe to call more than once.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    // Held across the install so concurrent first callers install once.
    let mut slot = METRICS_HANDLE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    *slot = Some(handle.clone());

    METRICS.get_or_init(Metrics::new);

    Ok(handle)
}

fn describe_metrics() {
    describe_counter!("ledger_journals_posted_total", Unit::Count, "Journals committed");
    describe_counter!("ledger_postings_rejected_total", Unit::Count, "Postings rejected or failed, by reason");
    describe_histogram!("ledger_posting_duration_ms", Unit::Milliseconds, "Posting latency in milliseconds");
    describe_histogram!("ledger_balance_query_duration_ms", Unit::Milliseconds, "Trial balance latency in milliseconds");
    describe_histogram!("ledger_balance_rows", Unit::Count, "Accounts returned by the trial balance");
}

/// Returns the global metrics instance.
pub fn get_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}
