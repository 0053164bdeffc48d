//! Guard predicates for controlling transitions.
//!
//! A guard sees the machine's extended context and the incoming event and
//! decides whether a transition may fire. Guards are pure: they never touch
//! the context, they only inspect it.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition can fire.
///
/// # Example
///
/// ```rust
/// use mindset_atom::core::Guard;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter {
///     count: u32,
/// }
///
/// let below_limit = Guard::new(|ctx: &Counter, _event: &&str| ctx.count < 3);
///
/// assert!(below_limit.check(&Counter { count: 2 }, &"INC"));
/// assert!(!below_limit.check(&Counter { count: 3 }, &"INC"));
/// ```
pub struct Guard<C, E> {
    predicate: Arc<dyn Fn(&C, &E) -> bool + Send + Sync>,
}

impl<C, E> Guard<C, E> {
    /// Create a guard from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against the current context and event.
    pub fn check(&self, context: &C, event: &E) -> bool {
        (self.predicate)(context, event)
    }
}

impl<C, E> Clone for Guard<C, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Cmd {
        Add(u32),
        Reset,
    }

    #[test]
    fn guard_reads_context() {
        let guard = Guard::new(|limit: &u32, _: &Cmd| *limit > 0);

        assert!(guard.check(&1, &Cmd::Reset));
        assert!(!guard.check(&0, &Cmd::Reset));
    }

    #[test]
    fn guard_reads_event_payload() {
        let guard = Guard::new(|limit: &u32, cmd: &Cmd| match cmd {
            Cmd::Add(n) => n <= limit,
            Cmd::Reset => true,
        });

        assert!(guard.check(&10, &Cmd::Add(10)));
        assert!(!guard.check(&10, &Cmd::Add(11)));
        assert!(guard.check(&0, &Cmd::Reset));
    }

    #[test]
    fn clones_share_the_predicate() {
        let guard = Guard::new(|ctx: &bool, _: &Cmd| *ctx);
        let cloned = guard.clone();

        assert_eq!(guard.check(&true, &Cmd::Reset), cloned.check(&true, &Cmd::Reset));
        assert_eq!(guard.check(&false, &Cmd::Reset), cloned.check(&false, &Cmd::Reset));
    }
}
