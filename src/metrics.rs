//! Load bookkeeping
//!
//! Counts catalog loads and keeps the sizes of the last few snapshots, so a
//! caller can tell when a reload shrank or grew the catalog.

use crate::error::LoadError;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::RwLock;

/// Number of snapshot sizes kept
const SIZE_HISTORY: usize = 16;

/// Report of catalog loads so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadMetrics {
    /// Loads that settled, successfully or not
    pub total_loads: u64,
    pub failed_loads: u64,
    /// Failures since the last successful load
    pub consecutive_failures: u64,
    /// Duration of the most recent load, in milliseconds
    pub last_load_ms: Option<u64>,
    pub last_success_at: Option<DateTime<Utc>>,
    /// Error of the most recent failed load, cleared by a success
    pub last_error: Option<String>,
    /// Record counts of the latest successful loads, oldest first
    pub snapshot_sizes: Vec<usize>,
}

impl LoadMetrics {
    /// Record count of the snapshot currently served by loads
    pub fn last_record_count(&self) -> Option<usize> {
        self.snapshot_sizes.last().copied()
    }

    /// Change in record count between the last two successful loads
    pub fn size_change(&self) -> Option<i64> {
        match self.snapshot_sizes.as_slice() {
            [.., previous, latest] => Some(*latest as i64 - *previous as i64),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct LoadLog {
    total: u64,
    failed: u64,
    consecutive_failures: u64,
    last_load: Option<Duration>,
    last_success_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    sizes: VecDeque<usize>,
}

/// Collects load outcomes for `CurrencyCatalog::load_metrics`
#[derive(Debug, Default)]
pub struct MetricsCollector {
    log: RwLock<LoadLog>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful load and the size of the snapshot it stored
    pub async fn record_success(&self, duration: Duration, records: usize) {
        let mut log = self.log.write().await;
        log.total += 1;
        log.consecutive_failures = 0;
        log.last_load = Some(duration);
        log.last_success_at = Some(Utc::now());
        log.last_error = None;

        if log.sizes.len() == SIZE_HISTORY {
            log.sizes.pop_front();
        }
        log.sizes.push_back(records);
    }

    /// Records a failed load; the snapshot history is left alone
    pub async fn record_failure(&self, duration: Duration, error: &LoadError) {
        let mut log = self.log.write().await;
        log.total += 1;
        log.failed += 1;
        log.consecutive_failures += 1;
        log.last_load = Some(duration);
        log.last_error = Some(error.to_string());
    }

    /// Current report
    pub async fn report(&self) -> LoadMetrics {
        let log = self.log.read().await;
        LoadMetrics {
            total_loads: log.total,
            failed_loads: log.failed,
            consecutive_failures: log.consecutive_failures,
            last_load_ms: log.last_load.map(|d| d.as_millis() as u64),
            last_success_at: log.last_success_at,
            last_error: log.last_error.clone(),
            snapshot_sizes: log.sizes.iter().copied().collect(),
        }
    }
}
