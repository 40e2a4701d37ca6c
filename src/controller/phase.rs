//! Phase and decision types.

use crate::core::{DirectionPair, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which pair has right-of-way, or which clearance is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// `pair` has green; the other pair is held at red
    Green(DirectionPair),

    /// Yellow clearance while right-of-way moves from `from` to `to`
    Yellow {
        from: DirectionPair,
        to: DirectionPair,
    },
}

impl Phase {
    /// Clearance interval that ends a green for `pair`.
    pub fn yellow_from(pair: DirectionPair) -> Self {
        Self::Yellow {
            from: pair,
            to: pair.opposite(),
        }
    }

    /// Pair that holds, or is about to receive, right-of-way.
    pub fn active_pair(&self) -> DirectionPair {
        match self {
            Self::Green(pair) => *pair,
            Self::Yellow { to, .. } => *to,
        }
    }

    pub fn is_green(&self) -> bool {
        matches!(self, Self::Green(_))
    }
}

impl State for Phase {
    fn name(&self) -> &str {
        match self {
            Self::Green(DirectionPair::A) => "Green(A)",
            Self::Green(DirectionPair::B) => "Green(B)",
            Self::Yellow {
                from: DirectionPair::A,
                ..
            } => "Yellow(A->B)",
            Self::Yellow {
                from: DirectionPair::B,
                ..
            } => "Yellow(B->A)",
        }
    }

    fn is_clearance(&self) -> bool {
        matches!(self, Self::Yellow { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The controller's persistent state: current phase and time spent in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseState {
    pub phase: Phase,
    pub elapsed: Duration,
}

impl PhaseState {
    /// Fresh green for `pair` with no elapsed time.
    pub fn green(pair: DirectionPair) -> Self {
        Self::entering(Phase::Green(pair))
    }

    pub(crate) fn entering(phase: Phase) -> Self {
        Self {
            phase,
            elapsed: Duration::ZERO,
        }
    }

    pub fn active_pair(&self) -> DirectionPair {
        self.phase.active_pair()
    }
}

/// Why a green phase is being ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchReason {
    /// The active pair held green for the maximum allowed time
    MaxGreenExceeded,

    /// The waiting pair is more congested than the hysteresis ratio allows
    DensityImbalance,
}

impl fmt::Display for SwitchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxGreenExceeded => f.write_str("maximum green time reached"),
            Self::DensityImbalance => {
                f.write_str("significantly higher density in waiting directions")
            }
        }
    }
}

/// What the caller should apply to the signal after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlDecision {
    /// Keep the current signal aspect
    Continue,

    /// Show yellow to the active pair; `target` gets green after clearance
    BeginTransition {
        target: DirectionPair,
        reason: SwitchReason,
    },

    /// Clearance finished; `now_green` has right-of-way
    CompleteTransition { now_green: DirectionPair },
}

impl ControlDecision {
    pub fn changes_signal(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}
