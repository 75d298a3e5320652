//! Recycling pool statistics tracking

use serde::{Deserialize, Serialize};

/// Lifecycle counters for a recycling pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Instances created by the pool (pre-warm and growth)
    pub total_created: u64,
    /// Instances destroyed by teardown
    pub total_destroyed: u64,
    /// Successful checkouts
    pub acquisitions: u64,
    /// Successful check-ins
    pub releases: u64,
    /// Instances moved back to the available set by reclaim
    pub reclaimed: u64,
    /// Checkouts that had to create new instances
    pub growth_events: u64,
    /// Teardowns that destroyed at least one instance
    pub teardowns: u64,
    /// Instances currently checked out
    pub currently_in_use: usize,
    /// Highest number of instances checked out at once
    pub peak_in_use: usize,
}

impl PoolStats {
    /// Create new statistics instance
    pub fn new() -> Self {
        Default::default()
    }

    /// Instances the pool currently owns
    pub fn pool_size(&self) -> u64 {
        self.total_created - self.total_destroyed
    }

    /// Share of owned instances that are checked out (0.0 to 1.0)
    pub fn utilization(&self) -> f64 {
        let size = self.pool_size();
        if size == 0 {
            return 0.0;
        }
        self.currently_in_use as f64 / size as f64
    }

    /// Share of checkouts served without creating anything (0.0 to 1.0)
    pub fn reuse_rate(&self) -> f64 {
        if self.acquisitions == 0 {
            return 1.0;
        }
        1.0 - (self.growth_events as f64 / self.acquisitions as f64)
    }

    pub(crate) fn record_created(&mut self, count: usize) {
        self.total_created += count as u64;
    }

    pub(crate) fn record_destroyed(&mut self, count: usize) {
        self.total_destroyed += count as u64;
        self.teardowns += 1;
        self.currently_in_use = 0;
    }

    pub(crate) fn record_acquisition(&mut self) {
        self.acquisitions += 1;
        self.currently_in_use += 1;
        if self.currently_in_use > self.peak_in_use {
            self.peak_in_use = self.currently_in_use;
        }
    }

    pub(crate) fn record_release(&mut self) {
        self.releases += 1;
        self.currently_in_use = self.currently_in_use.saturating_sub(1);
    }

    pub(crate) fn record_reclaim(&mut self, count: usize) {
        self.reclaimed += count as u64;
        self.currently_in_use = self.currently_in_use.saturating_sub(count);
    }

    pub(crate) fn record_growth(&mut self) {
        self.growth_events += 1;
    }

    /// Get a summary string of the statistics
    pub fn summary(&self) -> String {
        format!(
            "PoolStats {{ size: {}, in_use: {}, peak: {}, acquisitions: {}, releases: {}, \
             reclaimed: {}, growth: {}, reuse_rate: {:.2}%, utilization: {:.2}% }}",
            self.pool_size(),
            self.currently_in_use,
            self.peak_in_use,
            self.acquisitions,
            self.releases,
            self.reclaimed,
            self.growth_events,
            self.reuse_rate() * 100.0,
            self.utilization() * 100.0
        )
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
