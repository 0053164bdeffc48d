//! The public read/write handle.

use crate::adapter::gettable::Gettable;
use crate::adapter::lifecycle::Lifecycle;
use crate::adapter::message::WriteMessage;
use crate::adapter::options::MachineAtomOptions;
use crate::core::{MachineEvent, State};
use crate::interpreter::{
    ContextOf, EventOf, Interpreter, Machine, MachineInterpreter, SnapshotOf,
};
use crate::store::{AtomError, AtomKey, Getter, Readable, Store, Teardown, Writable};
use std::fmt;
use std::rc::Rc;

/// An atom whose value is the snapshot of a lazily started machine service.
///
/// - Reading yields `Some(snapshot)` while the atom is mounted in the store,
///   `None` before the first subscriber arrives.
/// - Writing a [`WriteMessage::Event`] forwards it to the service;
///   [`WriteMessage::Restart`] rebuilds the service from freshly resolved
///   inputs. Writes before the first subscriber are ignored.
/// - The service starts when the first subscriber arrives and is torn down
///   when the last one leaves.
pub struct MachineAtom<I: Interpreter> {
    key: AtomKey,
    lifecycle: Rc<Lifecycle<I>>,
}

impl<I: Interpreter + 'static> MachineAtom<I> {
    pub fn new(
        interpreter: I,
        machine: impl Into<Gettable<I::Machine>>,
        initial_context: Option<Gettable<ContextOf<I>>>,
    ) -> Self {
        Self::with_options(interpreter, machine, initial_context, MachineAtomOptions::default())
    }

    pub fn with_options(
        interpreter: I,
        machine: impl Into<Gettable<I::Machine>>,
        initial_context: Option<Gettable<ContextOf<I>>>,
        options: MachineAtomOptions,
    ) -> Self {
        let key = AtomKey::next();
        Self {
            key,
            lifecycle: Rc::new(Lifecycle::new(
                key,
                interpreter,
                machine.into(),
                initial_context,
                &options,
            )),
        }
    }

    pub fn label(&self) -> &str {
        self.lifecycle.label()
    }

    /// Whether a service is currently running in `store`.
    pub fn is_running(&self, store: &Store) -> bool {
        self.lifecycle.is_running(store)
    }

    pub fn snapshot(&self, store: &Store) -> Option<SnapshotOf<I>> {
        store.get(self)
    }

    /// Forward `event` to the running service.
    pub fn send(&self, store: &Store, event: EventOf<I>) -> Result<(), AtomError> {
        store.set(self, WriteMessage::Event(event))
    }

    /// Rebuild the running service.
    pub fn restart(&self, store: &Store) -> Result<(), AtomError> {
        store.set(self, WriteMessage::Restart)
    }
}

impl<I: Interpreter + 'static> Readable for MachineAtom<I> {
    type Value = Option<SnapshotOf<I>>;

    fn key(&self) -> AtomKey {
        self.key
    }

    fn read(&self, get: &Getter<'_>) -> Self::Value {
        self.lifecycle.read(get.store())
    }

    fn sources(&self) -> Vec<AtomKey> {
        self.lifecycle.sources()
    }

    fn on_mount(&self, store: &Store) -> Result<Option<Teardown>, AtomError> {
        self.lifecycle.initialize(store).map(Some)
    }
}

impl<I: Interpreter + 'static> Writable for MachineAtom<I> {
    type Arg = WriteMessage<EventOf<I>>;

    fn write(&self, store: &Store, message: Self::Arg) -> Result<(), AtomError> {
        self.lifecycle.dispatch(store, message)
    }
}

impl<I: Interpreter> Clone for MachineAtom<I> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            lifecycle: Rc::clone(&self.lifecycle),
        }
    }
}

impl<I: Interpreter + 'static> fmt::Debug for MachineAtom<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineAtom")
            .field("key", &self.key)
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}

/// Create a machine atom for a [`Machine`] run by the bundled interpreter.
///
/// `machine` and `initial_context` may be literals or resolvers reading other
/// atoms; resolvers run again on every restart.
///
/// # Example
///
/// ```rust
/// use mindset_atom::adapter::{atom_with_machine, WriteMessage};
/// use mindset_atom::builder::{simple_transition, MachineBuilder};
/// use mindset_atom::state_enum;
/// use mindset_atom::store::Store;
///
/// state_enum! {
///     enum Switch {
///         Off = "off",
///         On = "on",
///     }
/// }
///
/// let machine = MachineBuilder::<Switch, &'static str, ()>::new()
///     .initial(Switch::Off)
///     .add_transition(simple_transition(Switch::Off, "TOGGLE", Switch::On))
///     .add_transition(simple_transition(Switch::On, "TOGGLE", Switch::Off))
///     .build()
///     .unwrap();
///
/// let switch = atom_with_machine(machine, None);
/// let store = Store::new();
/// let _sub = store.sub(&switch, || {}).unwrap();
///
/// assert_eq!(store.get(&switch).unwrap().name(), "off");
/// store.set(&switch, WriteMessage::Event("TOGGLE")).unwrap();
/// assert_eq!(store.get(&switch).unwrap().name(), "on");
/// ```
pub fn atom_with_machine<S, E, C>(
    machine: impl Into<Gettable<Machine<S, E, C>>>,
    initial_context: Option<Gettable<C>>,
) -> MachineAtom<MachineInterpreter<S, E, C>>
where
    S: State + 'static,
    E: MachineEvent + 'static,
    C: Clone + 'static,
{
    MachineAtom::new(MachineInterpreter::new(), machine, initial_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{simple_transition, MachineBuilder};
    use crate::state_enum;

    state_enum! {
        enum Switch {
            Off,
            On,
        }
    }

    fn switch() -> MachineAtom<MachineInterpreter<Switch, &'static str, ()>> {
        let machine = MachineBuilder::new()
            .initial(Switch::Off)
            .add_transition(simple_transition(Switch::Off, "TOGGLE", Switch::On))
            .add_transition(simple_transition(Switch::On, "TOGGLE", Switch::Off))
            .build()
            .unwrap();
        atom_with_machine(machine, None)
    }

    fn switch_machine() -> Machine<Switch, &'static str, ()> {
        MachineBuilder::new()
            .initial(Switch::Off)
            .add_transition(simple_transition(Switch::Off, "TOGGLE", Switch::On))
            .build()
            .unwrap()
    }

    #[test]
    fn default_label_is_the_atom_key() {
        let atom = switch();
        assert_eq!(atom.label(), atom.key().to_string());
    }

    #[test]
    fn explicit_label_is_used() {
        let atom = MachineAtom::with_options(
            MachineInterpreter::<Switch, &'static str, ()>::new(),
            switch_machine(),
            None,
            MachineAtomOptions::new().label("switch"),
        );

        assert_eq!(atom.label(), "switch");
        assert!(format!("{atom:?}").contains("switch"));
    }

    #[test]
    fn helpers_route_through_the_store() {
        let atom = switch();
        let store = Store::new();
        let _sub = store.sub(&atom, || {}).unwrap();

        atom.send(&store, "TOGGLE").unwrap();
        assert_eq!(atom.snapshot(&store).unwrap().state(), &Switch::On);

        atom.restart(&store).unwrap();
        assert_eq!(atom.snapshot(&store).unwrap().state(), &Switch::Off);
    }

    #[test]
    fn clones_share_the_same_cells() {
        let atom = switch();
        let clone = atom.clone();
        let store = Store::new();
        let _sub = store.sub(&atom, || {}).unwrap();

        clone.send(&store, "TOGGLE").unwrap();

        assert_eq!(atom.key(), clone.key());
        assert_eq!(atom.snapshot(&store), clone.snapshot(&store));
        assert!(clone.is_running(&store));
    }
}
