//! Primitive atoms: keyed cells whose values live in a [`Store`].

use crate::store::{Getter, Readable, Store, Writable};
use crate::store::error::AtomError;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of an atom. Stores key their cells by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomKey(u64);

impl AtomKey {
    pub(crate) fn next() -> Self {
        AtomKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for AtomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom{}", self.0)
    }
}

/// Debug metadata shared by every atom kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub label: Option<String>,
    pub private: bool,
}

/// A readable/writable cell with an initial value.
///
/// The atom itself holds no state: each [`Store`] materializes its own cell
/// from the initial value on first access.
///
/// # Example
///
/// ```rust
/// use mindset_atom::store::{Atom, Store};
///
/// let count = Atom::new(0).with_label("count");
/// let store = Store::new();
///
/// assert_eq!(store.get(&count), 0);
/// store.set(&count, 5).unwrap();
/// assert_eq!(store.get(&count), 5);
/// ```
pub struct Atom<T> {
    key: AtomKey,
    init: Rc<dyn Fn() -> T>,
    debug: DebugInfo,
}

impl<T: 'static> Atom<T> {
    /// Atom whose cells start as clones of `value`.
    pub fn new(value: T) -> Self
    where
        T: Clone,
    {
        Self::with_default(move || value.clone())
    }

    /// Atom whose cells start from a fresh `init()` per store.
    pub fn with_default<F>(init: F) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self {
            key: AtomKey::next(),
            init: Rc::new(init),
            debug: DebugInfo::default(),
        }
    }
}

impl<T> Atom<T> {
    pub fn key(&self) -> AtomKey {
        self.key
    }

    /// Attach a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.debug.label = Some(label.into());
        self
    }

    /// Hide this atom from debug listings; used for internal cells.
    pub fn private(mut self) -> Self {
        self.debug.private = true;
        self
    }

    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug
    }

    pub fn is_private(&self) -> bool {
        self.debug.private
    }

    pub(crate) fn initial_value(&self) -> T {
        (self.init)()
    }
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            init: Rc::clone(&self.init),
            debug: self.debug.clone(),
        }
    }
}

impl<T> fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("key", &self.key)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.debug.label {
            Some(label) => write!(f, "{}:{}", self.key, label),
            None => write!(f, "{}", self.key),
        }
    }
}

impl<T: Clone + 'static> Readable for Atom<T> {
    type Value = T;

    fn key(&self) -> AtomKey {
        self.key
    }

    fn read(&self, get: &Getter<'_>) -> T {
        get.store().read_cell(self)
    }
}

impl<T: Clone + 'static> Writable for Atom<T> {
    type Arg = T;

    fn write(&self, store: &Store, value: T) -> Result<(), AtomError> {
        store.write_cell(self, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn keys_are_unique() {
        let a = Atom::new(1);
        let b = Atom::new(1);

        assert_ne!(a.key(), b.key());
        assert_eq!(a.clone().key(), a.key());
    }

    #[test]
    fn display_uses_label_when_present() {
        let atom = Atom::new(()).with_label("toggle");
        let key = atom.key();

        assert_eq!(atom.to_string(), format!("{key}:toggle"));
        assert_eq!(Atom::new(()).with_label("x").private().debug_info().label.as_deref(), Some("x"));
    }

    #[test]
    fn private_flag_is_opt_in() {
        assert!(!Atom::new(0).is_private());
        assert!(Atom::new(0).private().is_private());
    }

    #[test]
    fn with_default_runs_init_per_call() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let atom = Atom::with_default(move || {
            counter.set(counter.get() + 1);
            Vec::<u8>::new()
        });

        let _ = atom.initial_value();
        let _ = atom.initial_value();
        assert_eq!(calls.get(), 2);
    }
}
