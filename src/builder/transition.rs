//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, State};
use crate::interpreter::{Reducer, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, E, C> {
    from: Option<S>,
    event: Option<String>,
    to: Option<S>,
    guard: Option<Guard<C, E>>,
    reducer: Option<Reducer<C, E>>,
}

impl<S: State, E, C> TransitionBuilder<S, E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            reducer: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the name of the triggering event (required).
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Compute the next context when this transition fires (optional).
    pub fn reduce<F>(mut self, reducer: F) -> Self
    where
        F: Fn(&C, &E) -> C + Send + Sync + 'static,
    {
        self.reducer = Some(Arc::new(reducer));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, E, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from,
            event,
            to,
            guard: self.guard,
            reducer: self.reducer,
        })
    }
}

impl<S: State, E, C> Default for TransitionBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Door {
            Closed,
            Open,
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Opens(u32);

    type B = TransitionBuilder<Door, &'static str, Opens>;

    #[test]
    fn builder_validates_required_fields() {
        assert!(matches!(B::new().build(), Err(BuildError::MissingFromState)));
        assert!(matches!(
            B::new().from(Door::Closed).build(),
            Err(BuildError::MissingEvent)
        ));
        assert!(matches!(
            B::new().from(Door::Closed).on("OPEN").build(),
            Err(BuildError::MissingToState)
        ));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = B::new()
            .from(Door::Closed)
            .on("OPEN")
            .to(Door::Open)
            .build()
            .unwrap();

        assert_eq!(transition.from, Door::Closed);
        assert_eq!(transition.event, "OPEN");
        assert_eq!(transition.to, Door::Open);
        assert!(transition.guard.is_none());
        assert!(transition.reducer.is_none());
    }

    #[test]
    fn guard_and_reducer_are_wired() {
        let transition = B::new()
            .from(Door::Closed)
            .on("OPEN")
            .to(Door::Open)
            .when(|opens: &Opens, _: &&str| opens.0 < 3)
            .reduce(|opens: &Opens, _: &&str| Opens(opens.0 + 1))
            .build()
            .unwrap();

        assert!(transition.can_fire(&Door::Closed, &"OPEN", &Opens(2)));
        assert!(!transition.can_fire(&Door::Closed, &"OPEN", &Opens(3)));
        assert_eq!(transition.reduce(&Opens(2), &"OPEN"), Opens(3));
    }
}
