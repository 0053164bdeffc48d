//! Definition checks run by [`MachineBuilder::build`](super::MachineBuilder::build).
//!
//! Uses Stillwater's `Validation` so every violation is reported in one pass
//! instead of stopping at the first one.

use crate::builder::error::DefinitionViolation;
use crate::core::State;
use crate::interpreter::Transition;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionViolation>>;

/// Validate a machine definition, accumulating ALL violations.
pub(crate) fn validate_definition<S: State, E, C>(
    initial: &S,
    transitions: &[Transition<S, E, C>],
) -> Check {
    let mut checks: Vec<Check> = Vec::with_capacity(transitions.len() * 2 + 1);

    checks.push(if initial.is_final() {
        Validation::fail(DefinitionViolation::FinalInitialState {
            state: initial.name().to_string(),
        })
    } else {
        Validation::success(())
    });

    for (index, transition) in transitions.iter().enumerate() {
        checks.push(check_not_from_final(transition));
        checks.push(check_unambiguous(&transitions[..index], transition));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_not_from_final<S: State, E, C>(transition: &Transition<S, E, C>) -> Check {
    if transition.from.is_final() {
        Validation::fail(DefinitionViolation::TransitionFromFinal {
            state: transition.from.name().to_string(),
            event: transition.event.clone(),
        })
    } else {
        Validation::success(())
    }
}

// Only the second of two clashing transitions reports, so a pair yields one violation.
fn check_unambiguous<S: State, E, C>(
    earlier: &[Transition<S, E, C>],
    transition: &Transition<S, E, C>,
) -> Check {
    let clashes = transition.guard.is_none()
        && earlier.iter().any(|prior| {
            prior.guard.is_none() && prior.from == transition.from && prior.event == transition.event
        });

    if clashes {
        Validation::fail(DefinitionViolation::AmbiguousTransition {
            state: transition.from.name().to_string(),
            event: transition.event.clone(),
        })
    } else {
        Validation::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{guarded_transition, simple_transition};
    use crate::state_enum;

    state_enum! {
        enum Job {
            Queued,
            Running,
            Done,
        }
        final: [Done]
    }

    type T = Transition<Job, &'static str, ()>;

    #[test]
    fn well_formed_definition_passes() {
        let transitions: Vec<T> = vec![
            simple_transition(Job::Queued, "RUN", Job::Running),
            simple_transition(Job::Running, "FINISH", Job::Done),
        ];

        let result = validate_definition(&Job::Queued, &transitions);
        assert!(matches!(result, Validation::Success(_)));
    }

    #[test]
    fn guarded_duplicates_are_not_ambiguous() {
        let transitions: Vec<T> = vec![
            guarded_transition(Job::Queued, "RUN", Job::Running, |_: &(), _: &&str| true),
            simple_transition(Job::Queued, "RUN", Job::Done),
        ];

        let result = validate_definition(&Job::Queued, &transitions);
        assert!(matches!(result, Validation::Success(_)));
    }

    #[test]
    fn accumulates_all_violations() {
        let transitions: Vec<T> = vec![
            simple_transition(Job::Queued, "RUN", Job::Running),
            simple_transition(Job::Queued, "RUN", Job::Done),
            simple_transition(Job::Done, "RETRY", Job::Queued),
        ];

        match validate_definition(&Job::Done, &transitions) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);

                let has_final_initial = errors
                    .iter()
                    .any(|e| matches!(e, DefinitionViolation::FinalInitialState { .. }));
                let has_ambiguous = errors
                    .iter()
                    .any(|e| matches!(e, DefinitionViolation::AmbiguousTransition { .. }));
                let has_from_final = errors
                    .iter()
                    .any(|e| matches!(e, DefinitionViolation::TransitionFromFinal { .. }));

                assert!(has_final_initial);
                assert!(has_ambiguous);
                assert!(has_from_final);
            }
            Validation::Success(_) => panic!("Expected violations, got success"),
        }
    }
}
