//! Messages accepted by a machine atom's write side.

/// What a write to a [`MachineAtom`](super::MachineAtom) carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteMessage<E> {
    /// Forwarded verbatim to the running service.
    Event(E),
    /// Stop the running service, forget its snapshot and start a fresh one,
    /// re-resolving the machine definition and initial context.
    Restart,
}

impl<E> WriteMessage<E> {
    pub fn is_restart(&self) -> bool {
        matches!(self, WriteMessage::Restart)
    }
}

impl<E> From<E> for WriteMessage<E> {
    fn from(event: E) -> Self {
        WriteMessage::Event(event)
    }
}
