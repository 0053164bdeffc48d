//! Macros for declaring states and events.

/// Generate a `State` implementation for a simple enum.
///
/// Variants are named after themselves unless given an explicit name.
///
/// # Example
///
/// ```
/// use mindset_atom::core::State;
/// use mindset_atom::state_enum;
///
/// state_enum! {
///     pub enum Fetch {
///         Idle = "idle",
///         Loading = "loading",
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
///     error: [Failed]
/// }
///
/// assert_eq!(Fetch::Loading.name(), "loading");
/// assert_eq!(Fetch::Done.name(), "Done");
/// assert!(Fetch::Failed.is_error());
/// ```
#[macro_export]
macro_rules! state_enum {
    (@name $variant:ident) => { stringify!($variant) };
    (@name $variant:ident $label:literal) => { $label };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::state_enum!(@name $variant $($label)?)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate a `MachineEvent` implementation for a fieldless enum.
///
/// # Example
///
/// ```
/// use mindset_atom::core::MachineEvent;
/// use mindset_atom::event_enum;
///
/// event_enum! {
///     pub enum Toggle {
///         Flip = "TOGGLE",
///         Reset,
///     }
/// }
///
/// assert_eq!(Toggle::Flip.name(), "TOGGLE");
/// assert_eq!(Toggle::Reset.name(), "Reset");
/// ```
#[macro_export]
macro_rules! event_enum {
    (@name $variant:ident) => { stringify!($variant) };
    (@name $variant:ident $label:literal) => { $label };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::MachineEvent for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::event_enum!(@name $variant $($label)?)),*
                }
            }
        }
    };
}
