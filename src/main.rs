use clap::Parser;
use log::error;
use std::time::Duration;

use traffic_synch::simulation::{
    run_simulation, SimConfig, DEFAULT_MAX_ARRIVAL_MS, DEFAULT_MAX_CROSSING_MS, DEFAULT_THREADS,
    DEFAULT_VEHICLES,
};

#[derive(Parser)]
#[command(name = "traffic_synch")]
#[command(about = "Drive concurrent vehicle threads through a synchronized four-way intersection")]
struct Cli {
    /// Total number of vehicles to send through the intersection
    #[arg(long, default_value_t = DEFAULT_VEHICLES)]
    vehicles: usize,

    /// Number of concurrently running vehicle threads
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Upper bound on the time a vehicle spends crossing, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_CROSSING_MS)]
    max_crossing_ms: u64,

    /// Upper bound on the pause between a thread's vehicles, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_ARRIVAL_MS)]
    max_arrival_ms: u64,

    /// Seed for reproducible origins and timings
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Cli> for SimConfig {
    fn from(cli: Cli) -> Self {
        SimConfig {
            vehicles: cli.vehicles,
            threads: cli.threads,
            max_crossing: Duration::from_millis(cli.max_crossing_ms),
            max_arrival: Duration::from_millis(cli.max_arrival_ms),
            seed: cli.seed,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::from(Cli::parse());

    match run_simulation(&config) {
        Ok(stats) => stats.log_summary(),
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
