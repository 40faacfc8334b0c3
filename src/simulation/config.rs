//! Simulation driver configuration

use anyhow::Result;
use std::time::Duration;

/// Default number of vehicles sent through the intersection
pub const DEFAULT_VEHICLES: usize = 40;

/// Default number of concurrently running vehicle threads
pub const DEFAULT_THREADS: usize = 10;

/// Default upper bound on how long a vehicle spends crossing
pub const DEFAULT_MAX_CROSSING_MS: u64 = 5;

/// Default upper bound on the pause between a thread's vehicles
pub const DEFAULT_MAX_ARRIVAL_MS: u64 = 5;

/// Settings for one headless simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Total vehicles to send through
    pub vehicles: usize,
    /// Vehicle threads; each drives its share of the vehicles in sequence
    pub threads: usize,
    pub max_crossing: Duration,
    pub max_arrival: Duration,
    /// Seed for reproducible origins and timings
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vehicles: DEFAULT_VEHICLES,
            threads: DEFAULT_THREADS,
            max_crossing: Duration::from_millis(DEFAULT_MAX_CROSSING_MS),
            max_arrival: Duration::from_millis(DEFAULT_MAX_ARRIVAL_MS),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vehicles == 0 {
            anyhow::bail!("Simulation needs at least one vehicle");
        }
        if self.threads == 0 {
            anyhow::bail!("Simulation needs at least one vehicle thread");
        }
        Ok(())
    }

    /// Threads actually started; never more than there are vehicles
    pub fn effective_threads(&self) -> usize {
        self.threads.min(self.vehicles)
    }

    /// Number of vehicles driven by the thread at `thread_index`
    pub fn vehicles_for_thread(&self, thread_index: usize) -> usize {
        let threads = self.effective_threads();
        if threads == 0 {
            return 0;
        }
        self.vehicles / threads + usize::from(thread_index < self.vehicles % threads)
    }
}
