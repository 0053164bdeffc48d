//! Configuration for machine atoms.

/// How reads obtain the snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Return the snapshot cached by the last change notification.
    ///
    /// Consistent immediately after a write only when the interpreter
    /// notifies synchronously, as [`MachineService`](crate::interpreter::MachineService) does.
    #[default]
    Cached,
    /// Ask the live service for its snapshot on every read, falling back to
    /// the cache while the service is mid-transition. Use with interpreters
    /// that notify on a later turn.
    Resync,
}

/// Options for a [`MachineAtom`](super::MachineAtom).
///
/// # Example
///
/// ```rust
/// use mindset_atom::adapter::{MachineAtomOptions, ReadMode};
///
/// let options = MachineAtomOptions::new()
///     .label("checkout")
///     .read_mode(ReadMode::Resync);
///
/// assert_eq!(options.label.as_deref(), Some("checkout"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineAtomOptions {
    /// Debug label of the public atom; internal cells derive theirs from it.
    pub label: Option<String>,
    pub read_mode: ReadMode,
}

impl MachineAtomOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn read_mode(mut self, mode: ReadMode) -> Self {
        self.read_mode = mode;
        self
    }
}
