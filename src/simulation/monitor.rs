//! Independent safety check on who is inside the intersection
//!
//! Vehicles report here right after `enter` returns and right before they
//! call `exit`. Any moment with two origins inside is counted as a conflict.

use log::error;
use std::sync::{Mutex, PoisonError};

use crate::synch::{Direction, DIRECTION_COUNT};

/// Totals gathered by the monitor over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorReport {
    /// Entries made while a vehicle from another origin was inside
    pub conflicts: u64,
    /// Largest number of vehicles seen inside at once
    pub max_concurrent: u32,
}

#[derive(Debug, Default)]
struct Inside {
    per_origin: [u32; DIRECTION_COUNT],
    report: MonitorReport,
}

#[derive(Debug, Default)]
pub struct OccupancyMonitor {
    inside: Mutex<Inside>,
}

impl OccupancyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicle_entered(&self, origin: Direction) {
        let mut inside = self.inside.lock().unwrap_or_else(PoisonError::into_inner);

        let others: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&other| other != origin && inside.per_origin[other.index()] > 0)
            .collect();
        if !others.is_empty() {
            error!(
                "Conflict: vehicle from {} entered while {:?} occupied the intersection",
                origin, others
            );
            inside.report.conflicts += 1;
        }

        inside.per_origin[origin.index()] += 1;
        let total = inside.per_origin.iter().sum::<u32>();
        inside.report.max_concurrent = inside.report.max_concurrent.max(total);
    }

    pub fn vehicle_leaving(&self, origin: Direction) {
        let mut inside = self.inside.lock().unwrap_or_else(PoisonError::into_inner);
        let count = &mut inside.per_origin[origin.index()];
        *count = count.saturating_sub(1);
    }

    pub fn report(&self) -> MonitorReport {
        self.inside
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .report
    }
}
