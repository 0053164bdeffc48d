//! Builder for constructing machine definitions.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::builder::validate::validate_definition;
use crate::core::State;
use crate::interpreter::{Machine, StopHook, Transition};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<S: State, E, C> {
    initial: Option<S>,
    context: Option<C>,
    transitions: Vec<Transition<S, E, C>>,
    on_stop: Option<StopHook<S, C>>,
}

impl<S: State, E, C> MachineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            context: None,
            transitions: Vec::new(),
            on_stop: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the default extended context. Falls back to `C::default()`.
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, E, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, E, C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Release hook run when a service is stopped.
    ///
    /// Machines with a hook produce stoppable services; the atom adapter
    /// stops them on teardown and on restart.
    pub fn on_stop<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S, &C) + Send + Sync + 'static,
    {
        self.on_stop = Some(Arc::new(hook));
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or the definition is invalid.
    pub fn build(self) -> Result<Machine<S, E, C>, BuildError>
    where
        C: Default,
    {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        match validate_definition(&initial, &self.transitions) {
            Validation::Success(_) => Ok(Machine::new(
                initial,
                self.context.unwrap_or_default(),
                self.transitions,
                self.on_stop,
            )),
            Validation::Failure(violations) => {
                Err(BuildError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }
}

impl<S: State, E, C> Default for MachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::error::DefinitionViolation;
    use crate::builder::simple_transition;
    use crate::state_enum;

    state_enum! {
        enum Order {
            Cart,
            Paid,
            Shipped,
        }
        final: [Shipped]
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Items(u32);

    type B = MachineBuilder<Order, &'static str, Items>;

    #[test]
    fn builder_validates_required_fields() {
        assert!(matches!(B::new().build(), Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_transitions() {
        let result = B::new().initial(Order::Cart).build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = B::new()
            .initial(Order::Cart)
            .context(Items(2))
            .transition(TransitionBuilder::new().from(Order::Cart).on("PAY").to(Order::Paid))
            .unwrap()
            .add_transition(simple_transition(Order::Paid, "SHIP", Order::Shipped))
            .build()
            .unwrap();

        assert_eq!(machine.initial_state(), &Order::Cart);
        assert_eq!(machine.default_context(), &Items(2));
        assert_eq!(machine.transitions().len(), 2);
        assert!(!machine.is_stoppable());
    }

    #[test]
    fn context_defaults_when_unset() {
        let machine = B::new()
            .initial(Order::Cart)
            .transitions(vec![simple_transition(Order::Cart, "PAY", Order::Paid)])
            .build()
            .unwrap();

        assert_eq!(machine.default_context(), &Items::default());
    }

    #[test]
    fn stop_hook_makes_machine_stoppable() {
        let machine = B::new()
            .initial(Order::Cart)
            .add_transition(simple_transition(Order::Cart, "PAY", Order::Paid))
            .on_stop(|_: &Order, _: &Items| {})
            .build()
            .unwrap();

        assert!(machine.is_stoppable());
    }

    #[test]
    fn invalid_definition_reports_all_violations() {
        let result = B::new()
            .initial(Order::Cart)
            .transitions(vec![
                simple_transition(Order::Cart, "PAY", Order::Paid),
                simple_transition(Order::Cart, "PAY", Order::Shipped),
                simple_transition(Order::Shipped, "RETURN", Order::Cart),
            ])
            .build();

        match result {
            Err(BuildError::Invalid(violations)) => {
                assert_eq!(
                    violations,
                    vec![
                        DefinitionViolation::AmbiguousTransition {
                            state: "Cart".to_string(),
                            event: "PAY".to_string(),
                        },
                        DefinitionViolation::TransitionFromFinal {
                            state: "Shipped".to_string(),
                            event: "RETURN".to_string(),
                        },
                    ]
                );
            }
            other => panic!("Expected Invalid, got {:?}", other.map(|_| ())),
        }
    }
}
