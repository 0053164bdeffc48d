//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for defining machines
//! that the bundled [`MachineInterpreter`](crate::interpreter::MachineInterpreter)
//! runs.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;
mod validate;

pub use error::{BuildError, DefinitionViolation};
pub use machine::MachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::State;
use crate::interpreter::Transition;

/// Create an unconditional transition that keeps the context as is.
///
/// # Example
///
/// ```
/// use mindset_atom::builder::simple_transition;
/// use mindset_atom::interpreter::Transition;
/// use mindset_atom::state_enum;
///
/// state_enum! {
///     enum Switch {
///         Off,
///         On,
///     }
/// }
///
/// let transition: Transition<Switch, &'static str, ()> =
///     simple_transition(Switch::Off, "TOGGLE", Switch::On);
/// assert!(transition.can_fire(&Switch::Off, &"TOGGLE", &()));
/// ```
pub fn simple_transition<S, E, C>(from: S, event: &str, to: S) -> Transition<S, E, C>
where
    S: State,
{
    Transition {
        from,
        event: event.to_string(),
        to,
        guard: None,
        reducer: None,
    }
}

/// Create a transition that fires only while `guard` holds.
///
/// # Example
///
/// ```
/// use mindset_atom::builder::guarded_transition;
/// use mindset_atom::interpreter::Transition;
/// use mindset_atom::state_enum;
///
/// state_enum! {
///     enum Gate {
///         Locked,
///         Open,
///     }
/// }
///
/// let transition: Transition<Gate, &'static str, u32> =
///     guarded_transition(Gate::Locked, "COIN", Gate::Open, |coins: &u32, _: &&str| *coins > 0);
///
/// assert!(transition.can_fire(&Gate::Locked, &"COIN", &1));
/// assert!(!transition.can_fire(&Gate::Locked, &"COIN", &0));
/// ```
pub fn guarded_transition<S, E, C, F>(from: S, event: &str, to: S, guard: F) -> Transition<S, E, C>
where
    S: State,
    F: Fn(&C, &E) -> bool + Send + Sync + 'static,
{
    Transition {
        guard: Some(crate::core::Guard::new(guard)),
        ..simple_transition(from, event, to)
    }
}
