//! Run statistics for a scoring pass.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

use crate::types::criticality::CriticalityLabel;

/// Timings and counts collected over one workflow run.
///
/// The run is single-threaded, so this is built and consumed on one thread;
/// the workflow records into it stage by stage.
#[derive(Debug)]
pub struct RunMetrics {
    started: Instant,
    load_table: Duration,
    transform: Duration,
    predict: Duration,
    total: Duration,
    rows_scored: usize,
    label_counts: HashMap<CriticalityLabel, usize>,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            load_table: Duration::ZERO,
            transform: Duration::ZERO,
            predict: Duration::ZERO,
            total: Duration::ZERO,
            rows_scored: 0,
            label_counts: HashMap::new(),
        }
    }

    pub fn record_load_table(&mut self, elapsed: Duration) {
        self.load_table = elapsed;
    }

    pub fn record_transform(&mut self, elapsed: Duration) {
        self.transform = elapsed;
    }

    pub fn record_predict(&mut self, elapsed: Duration) {
        self.predict = elapsed;
    }

    /// Record the predicted labels for the run.
    pub fn record_labels(&mut self, labels: &[CriticalityLabel]) {
        self.rows_scored = labels.len();
        for label in labels {
            *self.label_counts.entry(*label).or_insert(0) += 1;
        }
    }

    /// Stamp the total wall-clock for the run.
    pub fn finish(&mut self) {
        self.total = self.started.elapsed();
    }

    pub fn rows_scored(&self) -> usize {
        self.rows_scored
    }

    pub fn label_count(&self, label: CriticalityLabel) -> usize {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Print the run summary box.
    pub fn print_summary(&self) {
        info!("╔══════════════════════════════════════════════════════╗");
        info!("║          SOW CRITICALITY SCORING - RUN SUMMARY       ║");
        info!("╠══════════════════════════════════════════════════════╣");
        info!(
            "║ Rows scored: {:>8}     │  Total time: {:>7.1} ms   ║",
            self.rows_scored,
            self.total.as_secs_f64() * 1000.0
        );
        info!(
            "║ Stages (ms): load={:>6.1} transform={:>6.1} predict={:>6.1} ║",
            self.load_table.as_secs_f64() * 1000.0,
            self.transform.as_secs_f64() * 1000.0,
            self.predict.as_secs_f64() * 1000.0
        );
        info!("╠══════════════════════════════════════════════════════╣");
        info!("║ Criticality distribution:                            ║");
        for label in CriticalityLabel::ALL {
            let count = self.label_count(label);
            let pct = if self.rows_scored > 0 {
                (count as f64 / self.rows_scored as f64) * 100.0
            } else {
                0.0
            };
            let bar_len = (pct / 5.0) as usize;
            let bar: String = "█".repeat(bar_len.min(20));
            info!(
                "║   {:<8}: {:>6} ({:>5.1}%) {}",
                label.as_str(),
                count,
                pct,
                bar
            );
        }
        info!("╚══════════════════════════════════════════════════════╝");
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
