//! Values supplied either directly or derived from other atoms.

use crate::store::{Getter, Store};
use std::fmt;
use std::rc::Rc;

/// A literal value or a resolver computing it from other atoms.
///
/// Derived values are re-resolved every time the machine service is
/// (re)started, so a restart observes the current state of the atoms the
/// resolver reads.
///
/// # Example
///
/// ```rust
/// use mindset_atom::adapter::Gettable;
/// use mindset_atom::store::{Atom, Store};
///
/// let start_on = Atom::new(false);
/// let reader = start_on.clone();
/// let initial = Gettable::derived(move |get| if get.get(&reader) { "on" } else { "off" });
///
/// let store = Store::new();
/// assert_eq!(store.resolve(&initial), "off");
///
/// store.set(&start_on, true).unwrap();
/// assert_eq!(store.resolve(&initial), "on");
/// assert_eq!(store.resolve(&Gettable::from("fixed")), "fixed");
/// ```
pub enum Gettable<T> {
    Literal(T),
    Derived(Rc<dyn Fn(&Getter<'_>) -> T>),
}

impl<T> Gettable<T> {
    /// Wrap a resolver function.
    pub fn derived<F>(resolver: F) -> Self
    where
        F: Fn(&Getter<'_>) -> T + 'static,
    {
        Gettable::Derived(Rc::new(resolver))
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Gettable::Derived(_))
    }
}

impl<T: Clone> Gettable<T> {
    /// Produce the value, invoking the resolver if there is one.
    pub fn resolve(&self, get: &Getter<'_>) -> T {
        match self {
            Gettable::Literal(value) => value.clone(),
            Gettable::Derived(resolver) => resolver(get),
        }
    }
}

impl Store {
    /// Resolve a [`Gettable`] against this store's current cells.
    pub fn resolve<T: Clone>(&self, value: &Gettable<T>) -> T {
        value.resolve(&Getter::new(self))
    }
}

impl<T> From<T> for Gettable<T> {
    fn from(value: T) -> Self {
        Gettable::Literal(value)
    }
}

impl<T: Clone> Clone for Gettable<T> {
    fn clone(&self) -> Self {
        match self {
            Gettable::Literal(value) => Gettable::Literal(value.clone()),
            Gettable::Derived(resolver) => Gettable::Derived(Rc::clone(resolver)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Gettable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gettable::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Gettable::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}
