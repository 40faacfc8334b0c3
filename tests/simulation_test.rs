use std::process::Command;
use std::time::Duration;

use traffic_synch::simulation::{run_simulation, SimConfig};
use traffic_synch::synch::Direction;

fn quick_config(vehicles: usize, threads: usize, seed: u64) -> SimConfig {
    SimConfig {
        vehicles,
        threads,
        max_crossing: Duration::from_millis(2),
        max_arrival: Duration::from_millis(2),
        seed: Some(seed),
    }
}

#[test]
fn test_every_vehicle_crosses_without_conflict() {
    let stats = run_simulation(&quick_config(60, 8, 42)).expect("simulation should succeed");

    assert_eq!(stats.vehicles_spawned, 60);
    assert_eq!(stats.vehicles_crossed, 60);
    assert_eq!(stats.admitted, 60);
    assert_eq!(stats.conflicts, 0);
    assert_eq!(
        Direction::ALL
            .into_iter()
            .map(|origin| stats.crossed_from(origin))
            .sum::<u64>(),
        60
    );
    assert!(stats.batches >= 1);
    assert!(stats.batches <= 60);
    assert!(stats.average_batch() >= 1.0);
}

#[test]
fn test_many_seeds_stay_safe() {
    for seed in 0..5 {
        let stats = run_simulation(&quick_config(40, 10, seed)).expect("simulation should succeed");
        assert_eq!(stats.vehicles_crossed, 40, "seed {}", seed);
        assert_eq!(stats.conflicts, 0, "seed {}", seed);
    }
}

#[test]
fn test_single_thread_never_queues() {
    let stats = run_simulation(&quick_config(10, 1, 3)).expect("simulation should succeed");

    assert_eq!(stats.vehicles_crossed, 10);
    assert_eq!(stats.promotions, 0);
    assert_eq!(stats.batches, 10);
    assert_eq!(stats.max_concurrent, 1);
}

#[test]
fn test_more_threads_than_vehicles() {
    let config = quick_config(3, 16, 9);
    assert_eq!(config.effective_threads(), 3);

    let stats = run_simulation(&config).expect("simulation should succeed");
    assert_eq!(stats.vehicles_crossed, 3);
}

#[test]
fn test_vehicles_split_across_threads() {
    let config = quick_config(10, 4, 0);
    let shares: Vec<usize> = (0..4).map(|index| config.vehicles_for_thread(index)).collect();

    assert_eq!(shares, vec![3, 3, 2, 2]);
}

#[test]
fn test_invalid_config_rejected() {
    assert!(run_simulation(&quick_config(10, 0, 0)).is_err());
    assert!(run_simulation(&quick_config(0, 4, 0)).is_err());
    assert!(SimConfig::default().validate().is_ok());
}

/// Test that the binary runs headless and logs its summary
#[test]
fn test_binary_logs_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_traffic_synch"))
        .args(["--vehicles", "30", "--threads", "6", "--seed", "7"])
        .args(["--max-crossing-ms", "2", "--max-arrival-ms", "2"])
        .env("RUST_LOG", "warn,traffic_synch=info")
        .output()
        .expect("Failed to execute simulation");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        stderr
    );

    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(stderr.contains("Vehicles crossed: 30"), "stderr: {}", stderr);
    assert!(stderr.contains("Conflicts: 0"), "stderr: {}", stderr);
}

#[test]
fn test_binary_rejects_zero_threads() {
    let output = Command::new(env!("CARGO_BIN_EXE_traffic_synch"))
        .args(["--threads", "0"])
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute simulation");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("at least one vehicle thread"),
        "stderr: {}",
        stderr
    );
}
