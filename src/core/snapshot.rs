//! Observed machine snapshots.

use super::state::State;
use serde::{Deserialize, Serialize};

/// The externally visible `{state, context}` pair at one point in time.
///
/// A snapshot is never updated in place: every transition produces a new
/// one, and the adapter swaps its cached snapshot in a single write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<S, C> {
    state: S,
    context: C,
}

impl<S, C> Snapshot<S, C> {
    pub fn new(state: S, context: C) -> Self {
        Self { state, context }
    }

    /// Current state value.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Current extended context.
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_parts(self) -> (S, C) {
        (self.state, self.context)
    }
}

impl<S: State, C> Snapshot<S, C> {
    /// Name of the current state.
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Whether the machine is currently in `state`.
    pub fn matches(&self, state: &S) -> bool {
        self.state == *state
    }

    /// Whether the machine reached a final state.
    pub fn is_done(&self) -> bool {
        self.state.is_final()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Phase {
            Idle,
            Done,
        }
        final: [Done]
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn accessors_expose_parts() {
        let snapshot = Snapshot::new(Phase::Idle, Counter { count: 3 });

        assert_eq!(snapshot.state(), &Phase::Idle);
        assert_eq!(snapshot.context().count, 3);
        assert_eq!(snapshot.name(), "Idle");
        assert!(snapshot.matches(&Phase::Idle));
        assert!(!snapshot.is_done());
    }

    #[test]
    fn final_state_marks_snapshot_done() {
        let snapshot = Snapshot::new(Phase::Done, ());
        assert!(snapshot.is_done());
    }

    #[test]
    fn snapshot_serializes_state_and_context() {
        let snapshot = Snapshot::new(Phase::Idle, Counter { count: 1 });
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json, serde_json::json!({ "state": "Idle", "context": { "count": 1 } }));

        let back: Snapshot<Phase, Counter> = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
