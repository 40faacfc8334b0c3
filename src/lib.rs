//! Intersection Synchronization Library
//!
//! Admission control for vehicles crossing a shared four-way intersection,
//! plus a headless multi-threaded simulation that exercises it.

pub mod simulation;
pub mod synch;
