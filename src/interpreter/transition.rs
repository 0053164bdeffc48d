//! Transitions between machine states.

use crate::core::{Guard, MachineEvent, State};
use std::sync::Arc;

/// Produces the next extended context from the current one and the event.
pub type Reducer<C, E> = Arc<dyn Fn(&C, &E) -> C + Send + Sync>;

/// A transition taken when the machine is in `from` and receives an event
/// named `event`.
pub struct Transition<S: State, E, C> {
    pub from: S,
    pub event: String,
    pub to: S,
    pub guard: Option<Guard<C, E>>,
    pub reducer: Option<Reducer<C, E>>,
}

impl<S: State, E: MachineEvent, C> Transition<S, E, C> {
    /// Whether this transition fires for `event` in `current` (pure).
    pub fn can_fire(&self, current: &S, event: &E, context: &C) -> bool {
        if *current != self.from || event.name() != self.event {
            return false;
        }

        self.guard.as_ref().map_or(true, |g| g.check(context, event))
    }
}

impl<S: State, E, C: Clone> Transition<S, E, C> {
    /// Context after taking this transition.
    pub fn reduce(&self, context: &C, event: &E) -> C {
        match &self.reducer {
            Some(reducer) => reducer(context, event),
            None => context.clone(),
        }
    }
}

impl<S: State, E, C> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            reducer: self.reducer.clone(),
        }
    }
}

impl<S: State, E, C> std::fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("reduces", &self.reducer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Switch {
            Off,
            On,
        }
    }

    fn toggle_on() -> Transition<Switch, &'static str, u32> {
        Transition {
            from: Switch::Off,
            event: "TOGGLE".to_string(),
            to: Switch::On,
            guard: None,
            reducer: None,
        }
    }

    #[test]
    fn fires_only_from_matching_state_and_event() {
        let transition = toggle_on();

        assert!(transition.can_fire(&Switch::Off, &"TOGGLE", &0));
        assert!(!transition.can_fire(&Switch::On, &"TOGGLE", &0));
        assert!(!transition.can_fire(&Switch::Off, &"PRESS", &0));
    }

    #[test]
    fn guard_can_block_firing() {
        let transition = Transition {
            guard: Some(Guard::new(|presses: &u32, _: &&str| *presses < 2)),
            ..toggle_on()
        };

        assert!(transition.can_fire(&Switch::Off, &"TOGGLE", &1));
        assert!(!transition.can_fire(&Switch::Off, &"TOGGLE", &2));
    }

    #[test]
    fn reduce_keeps_context_without_reducer() {
        assert_eq!(toggle_on().reduce(&7, &"TOGGLE"), 7);
    }

    #[test]
    fn reduce_applies_reducer() {
        let transition = Transition {
            reducer: Some(Arc::new(|presses: &u32, _: &&str| presses + 1) as Reducer<u32, &str>),
            ..toggle_on()
        };

        assert_eq!(transition.reduce(&7, &"TOGGLE"), 8);
    }
}
