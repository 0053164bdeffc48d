//! Immutable machine definitions.

use crate::core::{MachineEvent, State};
use crate::interpreter::transition::Transition;
use std::fmt;
use std::sync::Arc;

/// Hook run once when a service for this machine is stopped.
pub type StopHook<S, C> = Arc<dyn Fn(&S, &C) + Send + Sync>;

/// A machine definition: initial state, default context and transitions.
///
/// Definitions are cheap to clone and never change once built; every
/// service started from one gets its own current state and context.
pub struct Machine<S: State, E, C> {
    initial: S,
    context: C,
    transitions: Arc<[Transition<S, E, C>]>,
    on_stop: Option<StopHook<S, C>>,
}

impl<S: State, E, C> Machine<S, E, C> {
    pub(crate) fn new(
        initial: S,
        context: C,
        transitions: Vec<Transition<S, E, C>>,
        on_stop: Option<StopHook<S, C>>,
    ) -> Self {
        Self {
            initial,
            context,
            transitions: transitions.into(),
            on_stop,
        }
    }

    /// State a fresh service starts in (pure)
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Context used when the service is started without an override (pure)
    pub fn default_context(&self) -> &C {
        &self.context
    }

    pub fn transitions(&self) -> &[Transition<S, E, C>] {
        &self.transitions
    }

    pub(crate) fn stop_hook(&self) -> Option<&StopHook<S, C>> {
        self.on_stop.as_ref()
    }

    /// Whether services for this machine need an explicit stop.
    pub fn is_stoppable(&self) -> bool {
        self.on_stop.is_some()
    }
}

impl<S: State, E: MachineEvent, C> Machine<S, E, C> {
    /// First transition that fires for `event` in `current` (pure)
    pub fn select(&self, current: &S, event: &E, context: &C) -> Option<&Transition<S, E, C>> {
        self.transitions
            .iter()
            .find(|t| t.can_fire(current, event, context))
    }
}

impl<S: State, E, C: Clone> Clone for Machine<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            context: self.context.clone(),
            transitions: Arc::clone(&self.transitions),
            on_stop: self.on_stop.clone(),
        }
    }
}

impl<S: State, E, C: fmt::Debug> fmt::Debug for Machine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("initial", &self.initial)
            .field("context", &self.context)
            .field("transitions", &self.transitions)
            .field("stoppable", &self.is_stoppable())
            .finish()
    }
}
