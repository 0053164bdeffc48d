//! Mindset Atom: state machines behind a reactive atom
//!
//! A machine atom exposes a running state machine service as a single
//! read/write handle. UI code reads the current snapshot synchronously and
//! dispatches events through the same atom; the service is started lazily
//! when the atom gains its first subscriber and torn down when it loses the
//! last one.
//!
//! # Core Concepts
//!
//! - **Store / Atom**: single-threaded reactive cells with mount hooks
//! - **Interpreter / Service**: the seam to whatever runs the machine
//! - **MachineAtom**: lazy start, cached snapshots, restart, teardown
//! - **Builders**: fluent construction of machines for the bundled interpreter
//!
//! # Example
//!
//! ```rust
//! use mindset_atom::adapter::{atom_with_machine, WriteMessage};
//! use mindset_atom::builder::{MachineBuilder, TransitionBuilder};
//! use mindset_atom::state_enum;
//! use mindset_atom::store::Store;
//!
//! state_enum! {
//!     enum Counter {
//!         Active,
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Count {
//!     count: u32,
//! }
//!
//! let machine = MachineBuilder::new()
//!     .initial(Counter::Active)
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(Counter::Active)
//!             .on("INC")
//!             .to(Counter::Active)
//!             .reduce(|ctx: &Count, _: &&'static str| Count { count: ctx.count + 1 }),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let counter = atom_with_machine(machine, None);
//! let store = Store::new();
//!
//! // Nothing runs until someone subscribes.
//! assert!(store.get(&counter).is_none());
//!
//! let subscription = store.sub(&counter, || {}).unwrap();
//! assert_eq!(store.get(&counter).unwrap().context(), &Count { count: 0 });
//!
//! store.set(&counter, WriteMessage::Event("INC")).unwrap();
//! assert_eq!(store.get(&counter).unwrap().context(), &Count { count: 1 });
//!
//! store.set(&counter, WriteMessage::Restart).unwrap();
//! assert_eq!(store.get(&counter).unwrap().context(), &Count { count: 0 });
//!
//! drop(subscription);
//! assert!(store.get(&counter).is_none());
//! ```

pub mod adapter;
pub mod builder;
pub mod core;
pub mod interpreter;
pub mod store;

// Re-export commonly used types
pub use crate::adapter::{
    atom_with_machine, Gettable, MachineAtom, MachineAtomOptions, ReadMode, WriteMessage,
};
pub use crate::core::{Guard, MachineEvent, Snapshot, State};
pub use crate::interpreter::{Interpreter, Machine, MachineInterpreter, Service, Stoppable};
pub use crate::store::{Atom, AtomError, Getter, Store, Subscription};
