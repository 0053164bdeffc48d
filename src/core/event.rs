//! Events dispatched to a running machine.

use std::fmt::Debug;

/// Trait for events a machine reacts to.
///
/// Transitions are keyed by event name, so events carrying a payload
/// (`Add(5)`, `Add(7)`) select the same transition while reducers still see
/// the payload.
pub trait MachineEvent: Debug {
    /// Name the transition table is keyed by.
    fn name(&self) -> &str;
}

impl MachineEvent for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl MachineEvent for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
