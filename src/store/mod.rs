//! Single-threaded reactive store.
//!
//! Atoms are keys; a [`Store`] owns the cells behind them. Subscribing to an
//! atom mounts it: the first subscriber runs the atom's [`Readable::on_mount`]
//! hook, and dropping the last [`Subscription`] runs the teardown that hook
//! returned.
//!
//! The store is `Rc`-based and not `Send`. All reads, writes and listener
//! calls happen on the thread that owns it.

mod atom;
pub mod error;
mod subscription;

pub use atom::{Atom, AtomKey, DebugInfo};
pub use error::AtomError;
pub use subscription::Subscription;

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Teardown returned by a mount hook, run when the last subscriber leaves.
pub type Teardown = Box<dyn FnOnce(&Store)>;

type Listener = Rc<dyn Fn()>;

/// Anything that can be read from a store.
pub trait Readable {
    type Value;

    fn key(&self) -> AtomKey;

    fn read(&self, get: &Getter<'_>) -> Self::Value;

    /// Cells whose writes notify this atom's subscribers.
    fn sources(&self) -> Vec<AtomKey> {
        vec![self.key()]
    }

    /// Called when the atom gains its first subscriber in `store`.
    fn on_mount(&self, _store: &Store) -> Result<Option<Teardown>, AtomError> {
        Ok(None)
    }
}

/// Anything that accepts writes through a store.
pub trait Writable: Readable {
    type Arg;

    fn write(&self, store: &Store, arg: Self::Arg) -> Result<(), AtomError>;
}

/// Read accessor handed to resolvers.
pub struct Getter<'a> {
    store: &'a Store,
}

impl<'a> Getter<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Read the current value of `atom`.
    pub fn get<A: Readable>(&self, atom: &A) -> A::Value {
        atom.read(self)
    }

    pub(crate) fn store(&self) -> &'a Store {
        self.store
    }
}

#[derive(Default)]
struct Mount {
    subscribers: usize,
    teardown: Option<Teardown>,
}

#[derive(Default)]
struct StoreInner {
    cells: RefCell<HashMap<AtomKey, Box<dyn Any>>>,
    listeners: RefCell<HashMap<AtomKey, Vec<(u64, Listener)>>>,
    mounts: RefCell<HashMap<AtomKey, Mount>>,
    next_listener: Cell<u64>,
}

/// Holds atom cells, listeners and mount state.
///
/// Cloning a store yields another handle to the same cells.
#[derive(Clone, Default)]
pub struct Store {
    inner: Rc<StoreInner>,
}

/// Non-owning store handle, used by callbacks that must not keep a store alive.
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Read an atom.
    pub fn get<A: Readable>(&self, atom: &A) -> A::Value {
        atom.read(&Getter::new(self))
    }

    /// Write to an atom.
    pub fn set<A: Writable>(&self, atom: &A, arg: A::Arg) -> Result<(), AtomError> {
        atom.write(self, arg)
    }

    /// Subscribe to an atom, mounting it if this is its first subscriber.
    ///
    /// The listener only hears writes made after the mount completes. If the
    /// mount hook fails, nothing stays registered and the error is returned.
    pub fn sub<A, F>(&self, atom: &A, listener: F) -> Result<Subscription, AtomError>
    where
        A: Readable,
        F: Fn() + 'static,
    {
        let key = atom.key();
        let first = {
            let mut mounts = self.inner.mounts.borrow_mut();
            let mount = mounts.entry(key).or_default();
            mount.subscribers += 1;
            mount.subscribers == 1
        };

        if first {
            match atom.on_mount(self) {
                Ok(teardown) => {
                    if let Some(mount) = self.inner.mounts.borrow_mut().get_mut(&key) {
                        mount.teardown = teardown;
                    }
                }
                Err(err) => {
                    self.inner.mounts.borrow_mut().remove(&key);
                    return Err(err);
                }
            }
        }

        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);

        let sources = atom.sources();
        let listener: Listener = Rc::new(listener);
        let mut listeners = self.inner.listeners.borrow_mut();
        for source in &sources {
            listeners
                .entry(*source)
                .or_default()
                .push((id, Rc::clone(&listener)));
        }
        drop(listeners);

        Ok(Subscription::new(self.clone(), key, id, sources))
    }

    /// Whether `key` currently has at least one subscriber.
    pub fn is_mounted(&self, key: AtomKey) -> bool {
        self.inner
            .mounts
            .borrow()
            .get(&key)
            .is_some_and(|m| m.subscribers > 0)
    }

    pub(crate) fn unsubscribe(&self, key: AtomKey, id: u64, sources: &[AtomKey]) {
        self.remove_listener(id, sources);

        let teardown = {
            let mut mounts = self.inner.mounts.borrow_mut();
            let remaining = mounts.get_mut(&key).map(|mount| {
                mount.subscribers = mount.subscribers.saturating_sub(1);
                mount.subscribers
            });
            match remaining {
                Some(0) => mounts.remove(&key).and_then(|m| m.teardown),
                _ => None,
            }
        };

        if let Some(teardown) = teardown {
            teardown(self);
        }
    }

    fn remove_listener(&self, id: u64, sources: &[AtomKey]) {
        let mut listeners = self.inner.listeners.borrow_mut();
        for source in sources {
            if let Some(entries) = listeners.get_mut(source) {
                entries.retain(|(listener_id, _)| *listener_id != id);
                if entries.is_empty() {
                    listeners.remove(source);
                }
            }
        }
    }

    pub(crate) fn read_cell<T: Clone + 'static>(&self, atom: &Atom<T>) -> T {
        let key = atom.key();
        if let Some(value) = self
            .inner
            .cells
            .borrow()
            .get(&key)
            .and_then(|cell| cell.downcast_ref::<T>())
        {
            return value.clone();
        }

        let value = atom.initial_value();
        self.inner
            .cells
            .borrow_mut()
            .insert(key, Box::new(value.clone()));
        value
    }

    pub(crate) fn write_cell<T: 'static>(&self, atom: &Atom<T>, value: T) {
        let key = atom.key();
        let previous = self.inner.cells.borrow_mut().insert(key, Box::new(value));
        drop(previous);
        self.notify(key);
    }

    fn notify(&self, key: AtomKey) {
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .get(&key)
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();

        for listener in listeners {
            listener();
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("cells", &self.inner.cells.borrow().len())
            .field("mounted", &self.inner.mounts.borrow().len())
            .finish()
    }
}
