//! Core value types shared by the interpreter and the atom adapter.
//!
//! - States via the `State` trait
//! - Events via the `MachineEvent` trait
//! - Guard predicates for transition control
//! - Immutable snapshots of a running machine
//!
//! Everything in this module is pure data or pure functions.

mod event;
mod guard;
mod snapshot;
mod state;

pub use event::MachineEvent;
pub use guard::Guard;
pub use snapshot::Snapshot;
pub use state::State;
