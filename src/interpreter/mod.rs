//! Machine interpreter seam.
//!
//! The atom adapter never looks inside a machine definition. It only needs
//! something that turns a definition into a running [`Service`] and calls
//! back whenever that service transitions. This module defines that seam and
//! ships [`MachineInterpreter`], an interpreter for [`Machine`] definitions
//! built with [`crate::builder::MachineBuilder`].
//!
//! # Notification timing
//!
//! [`MachineService`] invokes the change callback synchronously from inside
//! [`Service::send`]. Other interpreters may notify later; the adapter only
//! keeps the most recent snapshot it was handed.

mod machine;
mod service;
mod transition;

pub use machine::{Machine, StopHook};
pub use service::{MachineInterpreter, MachineService};
pub use transition::{Reducer, Transition};

use crate::core::{Snapshot, State};

/// Callback a service invokes with its new snapshot after every transition.
pub type OnChange<S, C> = Box<dyn FnMut(&Snapshot<S, C>)>;

/// Explicit release of resources held by a running service.
pub trait Stoppable {
    /// Stop the service. Calling `stop` more than once must be harmless.
    fn stop(&mut self);
}

/// A running machine instance.
pub trait Service {
    type State: State + 'static;
    type Context: Clone + 'static;
    type Event: 'static;

    /// Current state.
    fn state(&self) -> &Self::State;

    /// Current extended context.
    fn context(&self) -> &Self::Context;

    /// Dispatch an event. Whether it causes a transition is up to the service.
    fn send(&mut self, event: Self::Event);

    /// Capture the current `{state, context}` pair.
    fn snapshot(&self) -> Snapshot<Self::State, Self::Context> {
        Snapshot::new(self.state().clone(), self.context().clone())
    }

    /// Stop capability, present only when the service holds resources that
    /// need explicit release.
    fn stopper(&mut self) -> Option<&mut dyn Stoppable> {
        None
    }
}

/// Turns a machine definition into a running [`Service`].
pub trait Interpreter {
    type Machine: Clone + 'static;
    type Service: Service + 'static;
    type Error: std::error::Error + 'static;

    /// Start a service for `machine`.
    ///
    /// `initial_context` overrides the machine's own default context when
    /// present. `on_change` must be invoked with the new snapshot after every
    /// transition.
    fn interpret(
        &self,
        machine: Self::Machine,
        on_change: OnChange<
            <Self::Service as Service>::State,
            <Self::Service as Service>::Context,
        >,
        initial_context: Option<<Self::Service as Service>::Context>,
    ) -> Result<Self::Service, Self::Error>;
}

/// State type of the services an interpreter produces.
pub type StateOf<I> = <<I as Interpreter>::Service as Service>::State;

/// Context type of the services an interpreter produces.
pub type ContextOf<I> = <<I as Interpreter>::Service as Service>::Context;

/// Event type of the services an interpreter produces.
pub type EventOf<I> = <<I as Interpreter>::Service as Service>::Event;

/// Snapshot type of the services an interpreter produces.
pub type SnapshotOf<I> = Snapshot<StateOf<I>, ContextOf<I>>;
