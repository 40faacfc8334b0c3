//! Thread-facing intersection coordinator
//!
//! One mutex guards the whole `IntersectionState`. Each origin has its own
//! condition variable, so a promotion wakes only the vehicles it admitted.

use log::{debug, trace};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::state::{Admission, IntersectionState, Snapshot};
use super::types::{Direction, DIRECTION_COUNT};

/// Serializes vehicles through a four-way intersection.
///
/// Vehicles from the same origin cross together as a batch. Distinct origins
/// take turns in the order they first started waiting.
///
/// Share it between vehicle threads with an `Arc`.
#[derive(Debug)]
pub struct Coordinator {
    state: Mutex<IntersectionState>,
    lanes: [Condvar; DIRECTION_COUNT],
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Create a coordinator for an idle intersection
    pub fn new() -> Self {
        Self {
            state: Mutex::new(IntersectionState::new()),
            lanes: std::array::from_fn(|_| Condvar::new()),
        }
    }

    // Every critical section leaves the state consistent, so a panic in
    // another vehicle thread doesn't invalidate it.
    fn lock(&self) -> MutexGuard<'_, IntersectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the vehicle may occupy the intersection.
    ///
    /// `destination` does not affect admission.
    pub fn enter(&self, origin: Direction, destination: Direction) {
        let mut state = self.lock();

        match state.arrive(origin) {
            Admission::Entered => {
                trace!("Vehicle {} -> {} entered idle intersection", origin, destination);
            }
            Admission::Queued { generation } => {
                trace!(
                    "Vehicle {} -> {} waiting ({} queued from {})",
                    origin,
                    destination,
                    state.waiting(origin),
                    origin
                );
                // The promotion already counted this vehicle into the batch
                let _state = self.lanes[origin.index()]
                    .wait_while(state, |state| state.generation(origin) == generation)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }
    }

    /// Record that a vehicle has left the intersection.
    ///
    /// Must follow exactly one completed `enter` by the same vehicle.
    pub fn exit(&self, origin: Direction, destination: Direction) {
        let mut state = self.lock();
        trace!("Vehicle {} -> {} left", origin, destination);

        if let Some(promotion) = state.depart() {
            debug!(
                "Promoting {} vehicle(s) from {}",
                promotion.cars, promotion.origin
            );
            self.lanes[promotion.origin.index()].notify_all();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Tear the coordinator down once every vehicle has exited
    pub fn cleanup(self) {
        let snapshot = self.snapshot();
        debug!(
            "Coordinator cleanup: {} admitted over {} promotions",
            snapshot.admitted, snapshot.promotions
        );
    }
}
