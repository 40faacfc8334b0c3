use log::info;
use std::time::Duration;

use crate::synch::{Direction, DIRECTION_COUNT};

/// Statistics collected over one simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub vehicles_spawned: u64,
    /// Vehicles that completed enter, crossing and exit
    pub vehicles_crossed: u64,
    /// Crossed vehicles per origin, indexed by `Direction::index`
    pub crossed_by_origin: [u64; DIRECTION_COUNT],
    /// Vehicles the coordinator admitted
    pub admitted: u64,
    /// Batches promoted from the pending queue
    pub promotions: u64,
    /// Batches started, including vehicles entering an idle intersection
    pub batches: u64,
    pub max_concurrent: u32,
    pub conflicts: u64,
    pub elapsed: Duration,
}

impl SimulationStats {
    pub fn crossed_from(&self, origin: Direction) -> u64 {
        self.crossed_by_origin[origin.index()]
    }

    pub fn average_batch(&self) -> f64 {
        if self.batches == 0 {
            return 0.0;
        }
        self.admitted as f64 / self.batches as f64
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed.as_secs_f64());
        info!("Vehicles spawned: {}", self.vehicles_spawned);
        info!("Vehicles crossed: {}", self.vehicles_crossed);
        for origin in Direction::ALL {
            info!("  from {}: {}", origin, self.crossed_from(origin));
        }
        info!("Batches: {}", self.batches);
        info!("Promotions: {}", self.promotions);
        info!("Average batch size: {:.2}", self.average_batch());
        info!("Max vehicles inside: {}", self.max_concurrent);
        info!("Conflicts: {}", self.conflicts);
    }
}
