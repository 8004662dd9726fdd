//! Metrics collection module
//!
//! Tracks search volume, failure breakdown, and engine latency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// How many latency samples the rolling window keeps.
const LATENCY_WINDOW: usize = 100;

/// In-process metrics collector
pub struct Metrics {
    /// Total search count
    total_searches: AtomicU64,
    /// Successful search count
    successes: AtomicU64,
    /// Failure counts keyed by error kind
    failures: RwLock<HashMap<String, u64>>,
    /// Engine latencies in ms (rolling window)
    latencies: RwLock<Vec<u64>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            failures: RwLock::new(HashMap::new()),
            latencies: RwLock::new(Vec::new()),
        }
    }

    /// Increment total search count
    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a successful search
    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed search under its error kind
    pub fn record_failure(&self, kind: &str) {
        let mut failures = self.failures.write().unwrap();
        *failures.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Record one engine round-trip latency
    pub fn record_latency(&self, time_ms: u64) {
        let mut latencies = self.latencies.write().unwrap();

        // Keep the last LATENCY_WINDOW samples
        if latencies.len() >= LATENCY_WINDOW {
            latencies.remove(0);
        }
        latencies.push(time_ms);
    }

    /// Get total searches
    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    /// Get successful searches
    pub fn get_successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    /// Get total failures across all kinds
    pub fn get_failure_count(&self) -> u64 {
        let failures = self.failures.read().unwrap();
        failures.values().sum()
    }

    /// Get failure counts per error kind
    pub fn get_failure_breakdown(&self) -> HashMap<String, u64> {
        self.failures.read().unwrap().clone()
    }

    /// Get average engine latency over the rolling window
    pub fn get_avg_latency(&self) -> Option<u64> {
        let latencies = self.latencies.read().unwrap();
        if latencies.is_empty() {
            None
        } else {
            Some(latencies.iter().sum::<u64>() / latencies.len() as u64)
        }
    }

    /// Get success percentage over everything recorded so far
    pub fn get_reliability(&self) -> f64 {
        let success_count = self.get_successes();
        let failure_count = self.get_failure_count();

        let total = success_count + failure_count;
        if total == 0 {
            100.0
        } else {
            (success_count as f64 / total as f64) * 100.0
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
