//! Controllers orchestrating the session store against the backend.
//!
//! - [`LifecycleController`]: project start, status refresh, reset.
//! - [`TurnController`]: one chat exchange at a time, optimistic append,
//!   authoritative reconciliation.

mod lifecycle;
mod turn;


pub use lifecycle::{LifecycleController, StartOutcome};
pub use turn::{TurnController, TurnOutcome};
