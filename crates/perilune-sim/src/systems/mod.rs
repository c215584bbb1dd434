//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World`; they mutate only the
//! entities they are invoked on. Collection pruning happens exclusively
//! in `cleanup`, never while another system is iterating.

pub mod cleanup;
pub mod gravity;
pub mod gun;
pub mod snapshot;
