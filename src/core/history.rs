//! State transition history tracking.
//!
//! A character machine runs for as long as its character exists, so the
//! history is a bounded window: once full, recording a transition drops the
//! oldest one.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Why a transition happened.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TransitionCause {
    /// The machine entered its initial state.
    Start,
    /// The ground probe stopped reporting contact.
    LostGround,
    /// The ground probe reported contact while airborne.
    Grounded,
    /// A jump press was delivered while a jump listener was live.
    JumpIntent,
    /// Vertical velocity reached zero on the way up.
    Apex,
    /// The host requested the switch directly.
    External,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use kinesis::core::{LocomotionState, StateTransition, TransitionCause};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some(LocomotionState::Move),
///     to: LocomotionState::Fall,
///     cause: TransitionCause::LostGround,
///     tick: 42,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.tick, 42);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left, `None` for the first entry
    pub from: Option<S>,
    /// The state being entered
    pub to: S,
    /// What requested the transition
    pub cause: TransitionCause,
    /// Simulation tick at which the transition happened
    pub tick: u64,
    /// Wall-clock time of the transition
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use kinesis::core::{LocomotionState, StateHistory, StateTransition, TransitionCause};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(8);
///
/// history.record(StateTransition {
///     from: None,
///     to: LocomotionState::Move,
///     cause: TransitionCause::Start,
///     tick: 0,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some(LocomotionState::Move),
///     to: LocomotionState::Jump,
///     cause: TransitionCause::JumpIntent,
///     tick: 3,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&LocomotionState::Move, &LocomotionState::Jump]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    capacity: usize,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl<S: State> StateHistory<S> {
    /// Capacity used by [`StateHistory::default`].
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create an empty history that keeps at most `capacity` transitions.
    ///
    /// Storage grows as transitions are recorded; only a small window is
    /// reserved up front, whatever the bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Re-bound the window to `capacity`, dropping the oldest transitions
    /// that no longer fit.
    pub fn with_window(mut self, capacity: usize) -> Self {
        let excess = self.transitions.len().saturating_sub(capacity);
        self.transitions.drain(..excess);
        self.capacity = capacity;
        self
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed within the window.
    ///
    /// Starts with the `from` state of the oldest retained transition (when
    /// it has one), followed by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Wall-clock duration between the oldest and newest retained transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    /// The most recent transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LocomotionState;

    fn transition(
        from: Option<LocomotionState>,
        to: LocomotionState,
        tick: u64,
    ) -> StateTransition<LocomotionState> {
        StateTransition {
            from,
            to,
            cause: TransitionCause::External,
            tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<LocomotionState> = StateHistory::default();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), StateHistory::<LocomotionState>::DEFAULT_CAPACITY);
    }

    #[test]
    fn get_path_starts_with_initial_entry() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition(None, LocomotionState::Move, 0));
        history.record(transition(
            Some(LocomotionState::Move),
            LocomotionState::Fall,
            5,
        ));

        let path = history.get_path();
        assert_eq!(path, vec![&LocomotionState::Move, &LocomotionState::Fall]);
    }

    #[test]
    fn record_evicts_oldest_when_full() {
        let mut history = StateHistory::with_capacity(2);
        history.record(transition(None, LocomotionState::Move, 0));
        history.record(transition(
            Some(LocomotionState::Move),
            LocomotionState::Jump,
            1,
        ));
        history.record(transition(
            Some(LocomotionState::Jump),
            LocomotionState::Fall,
            2,
        ));

        assert_eq!(history.len(), 2);
        let ticks: Vec<u64> = history.transitions().map(|t| t.tick).collect();
        assert_eq!(ticks, vec![1, 2]);

        // Window now opens on Move -> Jump
        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &LocomotionState::Move,
                &LocomotionState::Jump,
                &LocomotionState::Fall
            ]
        );
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(transition(None, LocomotionState::Move, 0));
        assert!(history.is_empty());
    }

    #[test]
    fn huge_capacity_does_not_allocate_up_front() {
        let mut history = StateHistory::with_capacity(usize::MAX);
        history.record(transition(None, LocomotionState::Move, 0));
        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn with_window_rebounds_and_trims_oldest() {
        let mut history = StateHistory::with_capacity(0);
        history.record(transition(None, LocomotionState::Move, 0));
        assert!(history.is_empty());

        let mut history = history.with_window(2);
        for tick in 0..3 {
            history.record(transition(None, LocomotionState::Fall, tick));
        }
        assert_eq!(history.len(), 2);

        let history = history.with_window(1);
        assert_eq!(history.capacity(), 1);
        let ticks: Vec<u64> = history.transitions().map(|t| t.tick).collect();
        assert_eq!(ticks, vec![2]);
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::with_capacity(4);
        history.record(transition(None, LocomotionState::Move, 0));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn duration_spans_oldest_to_newest() {
        let mut history = StateHistory::with_capacity(4);
        let start = Utc::now();
        history.record(StateTransition {
            timestamp: start,
            ..transition(None, LocomotionState::Move, 0)
        });
        history.record(StateTransition {
            timestamp: start + chrono::Duration::milliseconds(250),
            ..transition(Some(LocomotionState::Move), LocomotionState::Fall, 1)
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(3);
        history.record(transition(None, LocomotionState::Move, 0));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<LocomotionState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.capacity(), 3);
        assert_eq!(deserialized.last().map(|t| t.to), Some(LocomotionState::Move));
    }
}
