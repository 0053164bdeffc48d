//! State trait for machine states exposed through snapshots.
//!
//! Every state a machine can be in implements [`State`]. Snapshots carry the
//! state by value, so states are cheap-to-clone plain values.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for machine states.
///
/// All methods are pure. A state is an immutable value naming where the
/// machine currently is; the interpreter compares states with `PartialEq`
/// to select transitions.
///
/// # Example
///
/// ```rust
/// use mindset_atom::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Door {
///     Closed,
///     Open,
///     Broken,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Open => "open",
///             Self::Broken => "broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "open");
/// assert!(Door::Broken.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the state, as shown to UI code and in logs.
    fn name(&self) -> &str;

    /// Whether the machine stops accepting transitions in this state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
