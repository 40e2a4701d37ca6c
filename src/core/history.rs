//! Phase transition history.
//!
//! The controller runs indefinitely, so history is a bounded window: once
//! the retention limit is reached the oldest transition is dropped.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions kept by [`StateHistory::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use phaseplan::core::StateTransition;
/// use phaseplan::{DirectionPair, Phase};
/// use chrono::Utc;
/// use std::time::Duration;
///
/// let transition = StateTransition {
///     from: Phase::Green(DirectionPair::A),
///     to: Phase::yellow_from(DirectionPair::A),
///     timestamp: Utc::now(),
///     tick: 21,
///     dwell: Duration::from_secs(20),
///     reason: Some("maximum green time reached".to_string()),
/// };
/// assert_eq!(transition.dwell, Duration::from_secs(20));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Wall-clock time the transition was recorded
    pub timestamp: DateTime<Utc>,
    /// Controller tick on which the transition happened (1-based)
    pub tick: u64,
    /// Time spent in `from` before leaving it
    pub dwell: Duration,
    /// Why `from` was left, when the transition was a choice rather than a
    /// completed clearance
    #[serde(default)]
    pub reason: Option<String>,
}

/// Ordered, bounded history of state transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history keeping [`DEFAULT_HISTORY_LIMIT`] transitions.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history keeping at most `limit` transitions.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed within the retained window.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Wall-clock time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
