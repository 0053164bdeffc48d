//! Running services for [`Machine`] definitions.

use crate::core::{MachineEvent, State};
use crate::interpreter::machine::Machine;
use crate::interpreter::{Interpreter, OnChange, Service, Stoppable};
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use tracing::trace;

/// A running instance of a [`Machine`].
///
/// The change callback fires synchronously from [`Service::send`], and only
/// when a transition was taken.
pub struct MachineService<S: State, E, C> {
    machine: Machine<S, E, C>,
    current: S,
    context: C,
    on_change: OnChange<S, C>,
    stopped: bool,
}

impl<S: State, E, C: Clone> MachineService<S, E, C> {
    /// Start a service in the machine's initial state.
    pub fn start(machine: Machine<S, E, C>, on_change: OnChange<S, C>, context: Option<C>) -> Self {
        let current = machine.initial_state().clone();
        let context = context.unwrap_or_else(|| machine.default_context().clone());
        Self {
            machine,
            current,
            context,
            on_change,
            stopped: false,
        }
    }

    /// Whether [`Stoppable::stop`] has run.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn machine(&self) -> &Machine<S, E, C> {
        &self.machine
    }
}

impl<S, E, C> Service for MachineService<S, E, C>
where
    S: State + 'static,
    E: MachineEvent + 'static,
    C: Clone + 'static,
{
    type State = S;
    type Context = C;
    type Event = E;

    fn state(&self) -> &S {
        &self.current
    }

    fn context(&self) -> &C {
        &self.context
    }

    fn send(&mut self, event: E) {
        if self.stopped {
            trace!(event = event.name(), "service stopped; event ignored");
            return;
        }
        if self.current.is_final() {
            trace!(state = self.current.name(), event = event.name(), "final state; event ignored");
            return;
        }

        let Some(transition) = self.machine.select(&self.current, &event, &self.context) else {
            trace!(state = self.current.name(), event = event.name(), "no transition");
            return;
        };

        let next_context = transition.reduce(&self.context, &event);
        let next_state = transition.to.clone();
        trace!(
            from = self.current.name(),
            to = next_state.name(),
            event = event.name(),
            "transition"
        );
        self.current = next_state;
        self.context = next_context;

        let snapshot = self.snapshot();
        (self.on_change)(&snapshot);
    }

    fn stopper(&mut self) -> Option<&mut dyn Stoppable> {
        if self.machine.is_stoppable() {
            Some(self)
        } else {
            None
        }
    }
}

impl<S: State, E, C> Stoppable for MachineService<S, E, C> {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(hook) = self.machine.stop_hook() {
            hook(&self.current, &self.context);
        }
    }
}

impl<S: State, E, C: fmt::Debug> fmt::Debug for MachineService<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineService")
            .field("current", &self.current)
            .field("context", &self.context)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Interpreter for [`Machine`] definitions. Starting a service never fails.
pub struct MachineInterpreter<S, E, C> {
    _phantom: PhantomData<fn() -> (S, E, C)>,
}

impl<S, E, C> MachineInterpreter<S, E, C> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S, E, C> Default for MachineInterpreter<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E, C> Clone for MachineInterpreter<S, E, C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S, E, C> fmt::Debug for MachineInterpreter<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MachineInterpreter")
    }
}

impl<S, E, C> Interpreter for MachineInterpreter<S, E, C>
where
    S: State + 'static,
    E: MachineEvent + 'static,
    C: Clone + 'static,
{
    type Machine = Machine<S, E, C>;
    type Service = MachineService<S, E, C>;
    type Error = Infallible;

    fn interpret(
        &self,
        machine: Machine<S, E, C>,
        on_change: OnChange<S, C>,
        initial_context: Option<C>,
    ) -> Result<MachineService<S, E, C>, Infallible> {
        Ok(MachineService::start(machine, on_change, initial_context))
    }
}
