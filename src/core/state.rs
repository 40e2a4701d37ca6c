//! Core State trait for signal phases.
//!
//! Anything the controller records in its history implements this trait,
//! which provides pure methods for inspecting a state without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for controller states.
///
/// All methods are pure. States are immutable values describing where the
/// signal currently is in its cycle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition history
/// - `PartialEq`: transitions compare source and target
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: states are written into checkpoints
///
/// # Example
///
/// ```rust
/// use phaseplan::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Aspect {
///     Red,
///     Amber,
///     Green,
/// }
///
/// impl State for Aspect {
///     fn name(&self) -> &str {
///         match self {
///             Self::Red => "Red",
///             Self::Amber => "Amber",
///             Self::Green => "Green",
///         }
///     }
///
///     fn is_clearance(&self) -> bool {
///         matches!(self, Self::Amber)
///     }
/// }
///
/// assert!(Aspect::Amber.is_clearance());
/// assert!(!Aspect::Green.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// A signal cycles forever, so the default is `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is a clearance interval between two right-of-way states.
    ///
    /// Default implementation returns `false`.
    fn is_clearance(&self) -> bool {
        false
    }
}
