//! Per-waypoint accumulator of candidate states grouped by discrete key.

use crate::state::{Candidate, State, StateKey, WaypointLayer};
use std::collections::HashMap;

/// Buckets of candidates arriving at the next waypoint.
///
/// Insertion never deduplicates: several candidates may share a key and are
/// only resolved by the Pareto reduction. Infeasible candidates (energy or
/// time not strictly positive) are dropped on insertion.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    buckets: HashMap<StateKey, Vec<Candidate>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate to its bucket. Returns `false` if it was pruned.
    pub fn insert(&mut self, key: StateKey, candidate: Candidate) -> bool {
        if !candidate.is_feasible() {
            return false;
        }
        self.buckets.entry(key).or_default().push(candidate);
        true
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of candidates across all buckets.
    pub fn candidate_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn get(&self, key: &StateKey) -> Option<&[Candidate]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &[Candidate])> {
        self.buckets
            .iter()
            .map(|(key, candidates)| (key, candidates.as_slice()))
    }

    #[cfg(any(not(feature = "parallel"), test))]
    pub(crate) fn buckets_mut(&mut self) -> impl Iterator<Item = &mut Vec<Candidate>> {
        self.buckets.values_mut()
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn par_buckets_mut(
        &mut self,
    ) -> impl rayon::iter::ParallelIterator<Item = &mut Vec<Candidate>> {
        use rayon::iter::IntoParallelRefMutIterator;
        use rayon::iter::ParallelIterator;
        self.buckets.par_iter_mut().map(|(_, candidates)| candidates)
    }

    /// Appends every bucket of `other` after the candidates already held.
    pub fn merge(&mut self, other: StateStore) {
        for (key, mut candidates) in other.buckets {
            self.buckets.entry(key).or_default().append(&mut candidates);
        }
    }

    /// Freezes the store into a layer, buckets laid out in key order so that
    /// layer positions do not depend on hash iteration order.
    pub fn into_layer(self) -> WaypointLayer {
        let mut buckets: Vec<(StateKey, Vec<Candidate>)> = self.buckets.into_iter().collect();
        buckets.sort_unstable_by_key(|(key, _)| *key);
        let states = buckets
            .into_iter()
            .flat_map(|(key, candidates)| {
                candidates
                    .into_iter()
                    .map(move |candidate| State::new(key, candidate))
            })
            .collect();
        WaypointLayer::from_states(states)
    }
}
