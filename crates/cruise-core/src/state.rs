//! Discrete/continuous vehicle states and the per-waypoint layers that own them.

use serde::{Deserialize, Serialize};

/// Discrete part of a state: the bucket a candidate is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub height: usize,
    pub speed: usize,
    /// Waypoints left before speed may change again
    pub backoff: usize,
}

impl StateKey {
    pub fn new(height: usize, speed: usize, backoff: usize) -> Self {
        Self {
            height,
            speed,
            backoff,
        }
    }
}

/// Continuous part of a state together with its backreference.
///
/// `parent` indexes the predecessor inside the previous waypoint's layer.
/// Seed states carry `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub energy: f64,
    pub time: f64,
    pub parent: Option<usize>,
}

impl Candidate {
    pub fn new(energy: f64, time: f64, parent: Option<usize>) -> Self {
        Self {
            energy,
            time,
            parent,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.energy > 0.0 && self.time > 0.0
    }
}

/// A retained state: one discrete key plus one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub key: StateKey,
    pub energy: f64,
    pub time: f64,
    pub parent: Option<usize>,
}

impl State {
    pub fn new(key: StateKey, candidate: Candidate) -> Self {
        Self {
            key,
            energy: candidate.energy,
            time: candidate.time,
            parent: candidate.parent,
        }
    }
}

/// Finalized states for one waypoint index. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct WaypointLayer {
    states: Vec<State>,
}

impl WaypointLayer {
    /// Seed layer: every budget starts at height 0, speed 0, no lockout.
    pub fn seed(budgets: &[(f64, f64)]) -> Self {
        let key = StateKey::new(0, 0, 0);
        let states = budgets
            .iter()
            .map(|&(energy, time)| State::new(key, Candidate::new(energy, time, None)))
            .collect();
        Self { states }
    }

    pub(crate) fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn get(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of distinct discrete keys present in the layer.
    pub fn bucket_count(&self) -> usize {
        let mut keys: Vec<StateKey> = self.states.iter().map(|state| state.key).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.len()
    }
}
