//! Headless driver that sends vehicle threads through the coordinator
//!
//! Each vehicle thread drives its share of vehicles one after another:
//! pause, pick an origin and destination, `enter`, cross, `exit`.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::config::SimConfig;
use super::monitor::OccupancyMonitor;
use super::stats::SimulationStats;
use crate::synch::{Coordinator, Direction, DIRECTION_COUNT};

/// Everything a single vehicle thread needs
struct VehicleThread {
    index: usize,
    vehicles: usize,
    max_crossing: Duration,
    max_arrival: Duration,
    rng: StdRng,
    coordinator: Arc<Coordinator>,
    monitor: Arc<OccupancyMonitor>,
}

impl VehicleThread {
    /// Drive this thread's vehicles and return how many crossed from each origin
    fn run(mut self) -> [u64; DIRECTION_COUNT] {
        let mut crossed = [0; DIRECTION_COUNT];

        for vehicle in 0..self.vehicles {
            thread::sleep(random_duration(&mut self.rng, self.max_arrival));

            let origin = Direction::ALL[self.rng.random_range(0..DIRECTION_COUNT)];
            let turn = self.rng.random_range(1..DIRECTION_COUNT);
            let destination = Direction::ALL[(origin.index() + turn) % DIRECTION_COUNT];

            debug!(
                "Thread {} vehicle {} approaching {} -> {}",
                self.index, vehicle, origin, destination
            );

            self.coordinator.enter(origin, destination);
            self.monitor.vehicle_entered(origin);

            thread::sleep(random_duration(&mut self.rng, self.max_crossing));

            self.monitor.vehicle_leaving(origin);
            self.coordinator.exit(origin, destination);

            crossed[origin.index()] += 1;
        }

        crossed
    }
}

fn random_duration(rng: &mut StdRng, max: Duration) -> Duration {
    let max_micros = u64::try_from(max.as_micros()).unwrap_or(u64::MAX);
    Duration::from_micros(rng.random_range(0..=max_micros))
}

/// Seeded runs give each thread its own stream derived from the seed
fn thread_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_os_rng(),
    }
}

/// Run one simulation to completion
pub fn run_simulation(config: &SimConfig) -> Result<SimulationStats> {
    config.validate()?;

    let threads = config.effective_threads();
    info!(
        "Sending {} vehicles through the intersection on {} threads",
        config.vehicles, threads
    );

    let coordinator = Arc::new(Coordinator::new());
    let monitor = Arc::new(OccupancyMonitor::new());
    let start = Instant::now();

    let mut handles = Vec::with_capacity(threads);
    for index in 0..threads {
        let vehicle_thread = VehicleThread {
            index,
            vehicles: config.vehicles_for_thread(index),
            max_crossing: config.max_crossing,
            max_arrival: config.max_arrival,
            rng: thread_rng(config.seed, index),
            coordinator: Arc::clone(&coordinator),
            monitor: Arc::clone(&monitor),
        };

        let handle = thread::Builder::new()
            .name(format!("vehicle-{}", index))
            .spawn(move || vehicle_thread.run())
            .with_context(|| format!("Failed to spawn vehicle thread {}", index))?;
        handles.push(handle);
    }

    let mut crossed_by_origin = [0; DIRECTION_COUNT];
    for (index, handle) in handles.into_iter().enumerate() {
        let crossed = handle
            .join()
            .map_err(|_| anyhow::anyhow!("Vehicle thread {} panicked", index))?;
        for (total, count) in crossed_by_origin.iter_mut().zip(crossed) {
            *total += count;
        }
    }
    let elapsed = start.elapsed();

    let snapshot = coordinator.snapshot();
    let coordinator = Arc::try_unwrap(coordinator)
        .map_err(|_| anyhow::anyhow!("Coordinator still shared after all vehicles finished"))?;
    coordinator.cleanup();

    let report = monitor.report();
    let stats = SimulationStats {
        vehicles_spawned: config.vehicles as u64,
        vehicles_crossed: crossed_by_origin.iter().sum(),
        crossed_by_origin,
        admitted: snapshot.admitted,
        promotions: snapshot.promotions,
        batches: snapshot.batches,
        max_concurrent: report.max_concurrent,
        conflicts: report.conflicts,
        elapsed,
    };

    if stats.conflicts > 0 {
        stats.log_summary();
        anyhow::bail!(
            "Safety monitor saw {} conflicting entries into the intersection",
            stats.conflicts
        );
    }

    Ok(stats)
}
