//! Service lifecycle behind a machine atom.
//!
//! Per store, the adapter is either uninitialized (no service cell value) or
//! active (one [`ServiceSlot`]). `initialize` and `teardown` move between the
//! two. A restart swaps the running slot for a fresh one in place, so
//! subscribers never observe the empty state while the atom stays mounted.

use crate::adapter::gettable::Gettable;
use crate::adapter::message::WriteMessage;
use crate::adapter::options::{MachineAtomOptions, ReadMode};
use crate::core::Snapshot;
use crate::interpreter::{ContextOf, EventOf, Interpreter, OnChange, Service, SnapshotOf};
use crate::store::{Atom, AtomError, AtomKey, Getter, Store, Teardown};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// The running service plus the bookkeeping needed to stop it safely.
pub(crate) struct ServiceSlot<Svc> {
    id: Uuid,
    service: RefCell<Svc>,
    stop_pending: Cell<bool>,
}

impl<Svc: Service> ServiceSlot<Svc> {
    fn new(id: Uuid, service: Svc) -> Self {
        Self {
            id,
            service: RefCell::new(service),
            stop_pending: Cell::new(false),
        }
    }

    /// Live snapshot, unless the service is mid-transition.
    fn snapshot(&self) -> Option<Snapshot<Svc::State, Svc::Context>> {
        self.service.try_borrow().ok().map(|service| service.snapshot())
    }

    fn send(&self, atom: &str, event: Svc::Event) {
        trace!(atom, service = %self.id, "forwarding event");
        self.service.borrow_mut().send(event);

        if self.stop_pending.replace(false) {
            self.stop(atom);
        }
    }

    fn stop(&self, atom: &str) {
        match self.service.try_borrow_mut() {
            Ok(mut service) => {
                if let Some(stopper) = service.stopper() {
                    debug!(atom, service = %self.id, "stopping service");
                    stopper.stop();
                }
            }
            Err(_) => {
                warn!(atom, service = %self.id, "teardown during transition; stop deferred");
                self.stop_pending.set(true);
            }
        }
    }
}

/// Writes waiting behind the one currently being applied.
struct Mailbox<E> {
    queue: RefCell<VecDeque<WriteMessage<E>>>,
    draining: Cell<bool>,
}

impl<E> Default for Mailbox<E> {
    fn default() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }
}

struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

type SlotRef<I> = Rc<ServiceSlot<<I as Interpreter>::Service>>;

pub(crate) struct Lifecycle<I: Interpreter> {
    key: AtomKey,
    label: String,
    interpreter: I,
    machine: Gettable<I::Machine>,
    initial_context: Option<Gettable<ContextOf<I>>>,
    read_mode: ReadMode,
    service: Atom<Option<SlotRef<I>>>,
    snapshot: Atom<Option<SnapshotOf<I>>>,
    mailbox: Atom<Rc<Mailbox<EventOf<I>>>>,
}

impl<I: Interpreter + 'static> Lifecycle<I> {
    pub(crate) fn new(
        key: AtomKey,
        interpreter: I,
        machine: Gettable<I::Machine>,
        initial_context: Option<Gettable<ContextOf<I>>>,
        options: &MachineAtomOptions,
    ) -> Self {
        let label = options.label.clone().unwrap_or_else(|| key.to_string());

        Self {
            service: Atom::new(None).with_label(format!("{label}/service")).private(),
            snapshot: Atom::new(None).with_label(format!("{label}/snapshot")).private(),
            mailbox: Atom::with_default(|| Rc::new(Mailbox::default()))
                .with_label(format!("{label}/mailbox"))
                .private(),
            key,
            label,
            interpreter,
            machine,
            initial_context,
            read_mode: options.read_mode,
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Cells whose writes change what [`Lifecycle::read`] returns.
    pub(crate) fn sources(&self) -> Vec<AtomKey> {
        vec![self.snapshot.key()]
    }

    pub(crate) fn is_running(&self, store: &Store) -> bool {
        store.read_cell(&self.service).is_some()
    }

    /// Current snapshot, or `None` before the first initialize.
    pub(crate) fn read(&self, store: &Store) -> Option<SnapshotOf<I>> {
        if self.read_mode == ReadMode::Resync {
            if let Some(live) = store.read_cell(&self.service).and_then(|slot| slot.snapshot()) {
                return Some(live);
            }
        }

        store
            .read_cell(&self.snapshot)
            .or_else(|| store.read_cell(&self.service).and_then(|slot| slot.snapshot()))
    }

    /// Start a service unless one is running, and hand back the teardown.
    pub(crate) fn initialize(self: &Rc<Self>, store: &Store) -> Result<Teardown, AtomError> {
        if self.is_running(store) {
            trace!(atom = %self.label, "service already running");
        } else {
            self.start(store)?;
        }

        let lifecycle = Rc::clone(self);
        Ok(Box::new(move |store: &Store| lifecycle.teardown(store)))
    }

    /// Stop the running service (if stoppable) and clear both cells.
    pub(crate) fn teardown(&self, store: &Store) {
        if let Some(slot) = store.read_cell(&self.service) {
            debug!(atom = %self.label, service = %slot.id, "tearing down");
            slot.stop(&self.label);
        }
        store.write_cell(&self.service, None);
        store.write_cell(&self.snapshot, None);
    }

    /// Apply a write, queueing it if another write is being applied.
    pub(crate) fn dispatch(
        &self,
        store: &Store,
        message: WriteMessage<EventOf<I>>,
    ) -> Result<(), AtomError> {
        let mailbox = store.read_cell(&self.mailbox);
        if mailbox.draining.get() {
            trace!(atom = %self.label, "write queued behind in-flight dispatch");
            mailbox.queue.borrow_mut().push_back(message);
            return Ok(());
        }

        if !self.accepts(store, &message) {
            trace!(atom = %self.label, restart = message.is_restart(), "no running service; write dropped");
            return Ok(());
        }

        mailbox.queue.borrow_mut().push_back(message);
        mailbox.draining.set(true);
        let _guard = DrainGuard(&mailbox.draining);

        loop {
            let next = mailbox.queue.borrow_mut().pop_front();
            let Some(message) = next else {
                return Ok(());
            };
            if let Err(err) = self.apply(store, message) {
                mailbox.queue.borrow_mut().clear();
                return Err(err);
            }
        }
    }

    // Events need a running service; a restart only needs the atom mounted,
    // which lets it recover from a failed restart.
    fn accepts(&self, store: &Store, message: &WriteMessage<EventOf<I>>) -> bool {
        self.is_running(store) || (message.is_restart() && store.is_mounted(self.key))
    }

    fn apply(&self, store: &Store, message: WriteMessage<EventOf<I>>) -> Result<(), AtomError> {
        match message {
            WriteMessage::Event(event) => {
                let Some(slot) = store.read_cell(&self.service) else {
                    trace!(atom = %self.label, "service gone; queued event dropped");
                    return Ok(());
                };
                slot.send(&self.label, event);
                Ok(())
            }
            WriteMessage::Restart => {
                if !store.is_mounted(self.key) {
                    trace!(atom = %self.label, "unmounted; queued restart dropped");
                    return Ok(());
                }
                if let Some(slot) = store.read_cell(&self.service) {
                    debug!(atom = %self.label, service = %slot.id, "restarting");
                    slot.stop(&self.label);
                }
                // The new slot and primed snapshot overwrite the old ones; the
                // mount-time teardown owns the new service too.
                self.start(store).inspect_err(|_| {
                    store.write_cell(&self.service, None);
                    store.write_cell(&self.snapshot, None);
                })
            }
        }
    }

    fn start(&self, store: &Store) -> Result<(), AtomError> {
        let get = Getter::new(store);
        let machine = self.machine.resolve(&get);
        let initial_context = self.initial_context.as_ref().map(|ctx| ctx.resolve(&get));

        let id = Uuid::new_v4();
        let service = self
            .interpreter
            .interpret(machine, self.change_callback(store, id), initial_context)
            .map_err(|source| AtomError::ServiceStart {
                atom: self.label.clone(),
                source: Box::new(source),
            })?;

        let primed = service.snapshot();
        debug!(atom = %self.label, service = %id, state = primed.name(), "service started");

        store.write_cell(&self.service, Some(Rc::new(ServiceSlot::new(id, service))));
        store.write_cell(&self.snapshot, Some(primed));
        Ok(())
    }

    fn change_callback(
        &self,
        store: &Store,
        id: Uuid,
    ) -> OnChange<<I::Service as Service>::State, ContextOf<I>> {
        let store = store.downgrade();
        let service_cell = self.service.clone();
        let snapshot_cell = self.snapshot.clone();
        let label = self.label.clone();

        Box::new(move |snapshot: &SnapshotOf<I>| {
            let Some(store) = store.upgrade() else {
                return;
            };
            if store.read_cell(&service_cell).map(|slot| slot.id) != Some(id) {
                trace!(atom = %label, service = %id, "stale change notification discarded");
                return;
            }
            store.write_cell(&snapshot_cell, Some(snapshot.clone()));
        })
    }
}
