//! Build errors for machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Machine definition is invalid ({} violation(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<DefinitionViolation>),
}

/// A single problem found while validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("initial state '{state}' is final")]
    FinalInitialState { state: String },

    #[error("final state '{state}' has an outgoing transition on '{event}'")]
    TransitionFromFinal { state: String, event: String },

    #[error("more than one unguarded transition from '{state}' on '{event}'")]
    AmbiguousTransition { state: String, event: String },
}

fn summarize(violations: &[DefinitionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let error = BuildError::Invalid(vec![
            DefinitionViolation::FinalInitialState {
                state: "Done".to_string(),
            },
            DefinitionViolation::AmbiguousTransition {
                state: "Idle".to_string(),
                event: "GO".to_string(),
            },
        ]);

        assert_eq!(
            error.to_string(),
            "Machine definition is invalid (2 violation(s)): initial state 'Done' is final; \
             more than one unguarded transition from 'Idle' on 'GO'"
        );
    }
}
