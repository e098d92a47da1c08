use crate::error::ErrorKind;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const OUTCOME_OK: &str = "ok";

/// Counters for every check the [`crate::Sanitizer`] performs, labelled by
/// operation and outcome (`ok` or the error kind code).
#[derive(Clone)]
pub struct ValidationMetrics {
    registry: Arc<Registry>,
    checks: IntCounterVec,
    file_check_duration: Histogram,
}

impl ValidationMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let checks = IntCounterVec::new(
            Opts::new("sanitize_checks_total", "Total number of sanitization checks")
                .const_label("component", "sanitize-core"),
            &["operation", "outcome"],
        )?;

        let file_check_duration = Histogram::with_opts(
            HistogramOpts::new(
                "sanitize_file_check_seconds",
                "Duration of file name existence checks in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5]),
        )?;

        registry.register(Box::new(checks.clone()))?;
        registry.register(Box::new(file_check_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            checks,
            file_check_duration,
        })
    }

    pub fn record(&self, operation: &str, outcome: Option<ErrorKind>) {
        let outcome = outcome.map_or(OUTCOME_OK, |kind| kind.as_str());
        self.checks.with_label_values(&[operation, outcome]).inc();
    }

    pub fn observe_file_check(&self, elapsed: Duration) {
        self.file_check_duration.observe(elapsed.as_secs_f64());
    }

    pub fn count(&self, operation: &str, outcome: Option<ErrorKind>) -> u64 {
        let outcome = outcome.map_or(OUTCOME_OK, |kind| kind.as_str());
        self.checks.with_label_values(&[operation, outcome]).get()
    }

    pub fn file_checks_observed(&self) -> u64 {
        self.file_check_duration.get_sample_count()
    }

    pub fn export(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl fmt::Debug for ValidationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationMetrics").finish_non_exhaustive()
    }
}
