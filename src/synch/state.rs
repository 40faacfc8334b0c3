//! Admission state machine for the intersection
//!
//! Pure bookkeeping with no blocking. The coordinator wraps this in a mutex
//! and turns `Admission::Queued` into a condition-variable wait.

use super::pending_queue::PendingQueue;
use super::types::{Direction, DIRECTION_COUNT};

/// Who is inside the intersection right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Nobody inside, nobody waiting
    Idle,
    /// A batch of `cars` vehicles, all arriving from `origin`
    Active { origin: Direction, cars: u32 },
}

/// Outcome of a vehicle arriving at the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The intersection was idle and the vehicle went straight in
    Entered,
    /// The vehicle must wait until its origin's generation moves past `generation`
    Queued { generation: u64 },
}

/// A waiting origin moved into the intersection after the previous batch drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Promotion {
    pub origin: Direction,
    pub cars: u32,
}

/// Point-in-time copy of the coordinator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub occupancy: Occupancy,
    /// Pending origins, oldest first
    pub pending: Vec<Direction>,
    /// Vehicles waiting per origin, indexed by `Direction::index`
    pub waiting: [u32; DIRECTION_COUNT],
    /// Vehicles admitted since creation
    pub admitted: u64,
    /// Batches promoted from the pending queue since creation
    pub promotions: u64,
    /// Batches started since creation, direct entries included
    pub batches: u64,
}

impl Snapshot {
    /// Number of vehicles inside the intersection
    pub fn cars_inside(&self) -> u32 {
        match self.occupancy {
            Occupancy::Idle => 0,
            Occupancy::Active { cars, .. } => cars,
        }
    }

    pub fn active_origin(&self) -> Option<Direction> {
        match self.occupancy {
            Occupancy::Idle => None,
            Occupancy::Active { origin, .. } => Some(origin),
        }
    }

    pub fn waiting_from(&self, origin: Direction) -> u32 {
        self.waiting[origin.index()]
    }

    /// Vehicles that have entered but not yet exited, inside or waiting
    pub fn in_flight(&self) -> u32 {
        self.cars_inside() + self.waiting.iter().sum::<u32>()
    }
}

/// All mutable intersection state
#[derive(Debug, Clone)]
pub struct IntersectionState {
    occupancy: Occupancy,
    pending: PendingQueue,
    waiting: [u32; DIRECTION_COUNT],
    /// Bumped each time an origin is promoted; waiters compare against it
    generations: [u64; DIRECTION_COUNT],
    admitted: u64,
    promotions: u64,
    batches: u64,
}

impl Default for IntersectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionState {
    pub fn new() -> Self {
        Self {
            occupancy: Occupancy::Idle,
            pending: PendingQueue::new(),
            waiting: [0; DIRECTION_COUNT],
            generations: [0; DIRECTION_COUNT],
            admitted: 0,
            promotions: 0,
            batches: 0,
        }
    }

    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn waiting(&self, origin: Direction) -> u32 {
        self.waiting[origin.index()]
    }

    pub fn generation(&self, origin: Direction) -> u64 {
        self.generations[origin.index()]
    }

    /// Register a vehicle arriving from `origin`.
    ///
    /// An idle intersection admits the vehicle at once. Otherwise the origin
    /// joins the pending queue (once) and the vehicle is counted as waiting,
    /// even when it shares the running batch's origin: a running batch is
    /// closed to latecomers.
    pub fn arrive(&mut self, origin: Direction) -> Admission {
        if self.occupancy == Occupancy::Idle {
            self.occupancy = Occupancy::Active { origin, cars: 1 };
            self.admitted += 1;
            self.batches += 1;
            return Admission::Entered;
        }

        self.pending.push(origin);
        self.waiting[origin.index()] += 1;
        Admission::Queued {
            generation: self.generation(origin),
        }
    }

    /// Register a vehicle leaving the intersection.
    ///
    /// When the last vehicle of the batch leaves, the oldest pending origin is
    /// promoted: all of its waiting vehicles become the new batch and its
    /// generation advances so they can stop waiting.
    pub fn depart(&mut self) -> Option<Promotion> {
        // An exit without a matching entry leaves the state untouched
        let Occupancy::Active { origin, cars } = self.occupancy else {
            return None;
        };

        if cars > 1 {
            self.occupancy = Occupancy::Active {
                origin,
                cars: cars - 1,
            };
            return None;
        }

        let Some(next) = self.pending.pop() else {
            self.occupancy = Occupancy::Idle;
            return None;
        };

        let index = next.index();
        let promoted = std::mem::take(&mut self.waiting[index]);
        self.generations[index] += 1;
        self.occupancy = Occupancy::Active {
            origin: next,
            cars: promoted,
        };
        self.admitted += u64::from(promoted);
        self.promotions += 1;
        self.batches += 1;

        Some(Promotion {
            origin: next,
            cars: promoted,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            occupancy: self.occupancy,
            pending: self.pending.iter().collect(),
            waiting: self.waiting,
            admitted: self.admitted,
            promotions: self.promotions,
            batches: self.batches,
        }
    }
}
