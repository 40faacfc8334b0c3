//! Intersection admission control
//!
//! Vehicle threads call [`Coordinator::enter`] before crossing and
//! [`Coordinator::exit`] afterwards. Only vehicles sharing an origin are
//! ever inside at the same time.

mod coordinator;
mod pending_queue;
mod state;
mod types;

pub use coordinator::Coordinator;
pub use pending_queue::PendingQueue;
pub use state::{Admission, IntersectionState, Occupancy, Promotion, Snapshot};
pub use types::{Direction, DIRECTION_COUNT};
