//! Headless traffic simulation
//!
//! Drives many vehicle threads through a shared [`Coordinator`] and checks
//! that vehicles from different origins never cross at the same time.
//!
//! [`Coordinator`]: crate::synch::Coordinator

mod config;
mod driver;
mod monitor;
mod stats;

pub use config::{
    SimConfig, DEFAULT_MAX_ARRIVAL_MS, DEFAULT_MAX_CROSSING_MS, DEFAULT_THREADS, DEFAULT_VEHICLES,
};
pub use driver::run_simulation;
pub use monitor::{MonitorReport, OccupancyMonitor};
pub use stats::SimulationStats;
