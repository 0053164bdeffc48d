//! Machine atoms: a state machine service behind one read/write handle.
//!
//! A [`MachineAtom`] keeps two private cells per store: the running service
//! and the last snapshot it reported. Reads return the cached snapshot
//! synchronously. The service is started by the first subscriber, rebuilt on
//! [`WriteMessage::Restart`], and stopped when the last subscriber leaves.
//!
//! # Read-after-write consistency
//!
//! With the bundled interpreter a read right after a write already sees the
//! new snapshot, because the service notifies from inside `send`. For
//! interpreters that notify later, use [`ReadMode::Resync`].

mod gettable;
mod lifecycle;
mod machine_atom;
mod message;
mod options;

pub use gettable::Gettable;
pub use machine_atom::{atom_with_machine, MachineAtom};
pub use message::WriteMessage;
pub use options::{MachineAtomOptions, ReadMode};
