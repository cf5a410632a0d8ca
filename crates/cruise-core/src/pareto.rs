//! Pareto reduction of (energy, time) candidates.
//!
//! Both objectives are maximized: a candidate dominates another if it keeps
//! at least as much energy and at least as much time, and more of one.
//!
//! Per-bucket reduction is bounded by `pareto_max` through even sampling of
//! the frontier. The reduction of the final layer is global and exact:
//! [`global_front`] never samples.

use crate::state::{Candidate, WaypointLayer};
use crate::store::StateStore;
use std::cmp::Ordering;

/// Returns true if `a` dominates `b` (no worse in both, better in one).
pub fn dominates(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 >= b.0 && a.1 >= b.1 && (a.0 > b.0 || a.1 > b.1)
}

/// Descending energy, ties broken by descending time.
fn scan_order(a: (f64, f64), b: (f64, f64)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.total_cmp(&a.1))
}

/// Bounded per-bucket frontier reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParetoFilter {
    pareto_max: usize,
}

impl ParetoFilter {
    /// `pareto_max` is clamped to at least one point.
    pub fn new(pareto_max: usize) -> Self {
        Self {
            pareto_max: pareto_max.max(1),
        }
    }

    pub fn pareto_max(&self) -> usize {
        self.pareto_max
    }

    /// Reduces one bucket in place to its sampled non-dominated frontier,
    /// ordered by descending energy.
    pub fn reduce(&self, candidates: &mut Vec<Candidate>) {
        retain_frontier(candidates);
        sample_in_place(candidates, self.pareto_max);
    }

    /// Reduces every bucket of the store independently.
    #[cfg(not(feature = "parallel"))]
    pub fn collapse(&self, store: &mut StateStore) {
        for candidates in store.buckets_mut() {
            self.reduce(candidates);
        }
    }

    /// Reduces every bucket of the store independently, one rayon task per bucket.
    #[cfg(feature = "parallel")]
    pub fn collapse(&self, store: &mut StateStore) {
        use rayon::iter::ParallelIterator;
        store
            .par_buckets_mut()
            .for_each(|candidates| self.reduce(candidates));
    }
}

/// Sorts candidates in scan order and keeps those whose time strictly beats
/// every earlier (higher or equal energy) candidate.
fn retain_frontier(candidates: &mut Vec<Candidate>) {
    if candidates.is_empty() {
        return;
    }
    candidates.sort_by(|a, b| scan_order((a.energy, a.time), (b.energy, b.time)));
    let mut best_time = candidates[0].time;
    let mut kept = 1;
    for idx in 1..candidates.len() {
        let candidate = candidates[idx];
        if candidate.time > best_time {
            best_time = candidate.time;
            candidates[kept] = candidate;
            kept += 1;
        }
    }
    candidates.truncate(kept);
}

/// Keeps `pareto_max` frontier points at evenly spaced positions.
fn sample_in_place(frontier: &mut Vec<Candidate>, pareto_max: usize) {
    let len = frontier.len();
    if len <= pareto_max {
        return;
    }
    let mut kept = 0;
    let mut last: Option<usize> = None;
    for idx in sample_positions(len, pareto_max) {
        if last == Some(idx) {
            continue;
        }
        // positions are non-decreasing, so `idx >= kept` and nothing is overwritten early
        frontier[kept] = frontier[idx];
        kept += 1;
        last = Some(idx);
    }
    frontier.truncate(kept);
}

/// Evenly spaced fractional positions over `[0, len - 1]`, `count` of them,
/// each rounded half-to-even to an index. Both endpoints are included when
/// `count > 1`. Consecutive duplicates are possible; callers drop them.
pub fn sample_positions(len: usize, count: usize) -> impl Iterator<Item = usize> {
    let last = len.saturating_sub(1);
    let step = if count > 1 {
        last as f64 / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |j| {
        if count > 1 && j == count - 1 {
            last
        } else {
            ((j as f64) * step).round_ties_even() as usize
        }
    })
}

/// Exact frontier over the whole final layer, ignoring discrete keys.
///
/// Returns layer positions in scan order (descending energy, ascending
/// time). No sampling is applied here; the result may exceed `pareto_max`.
pub fn global_front(layer: &WaypointLayer) -> Vec<usize> {
    let states = layer.states();
    let mut order: Vec<usize> = (0..states.len()).collect();
    order.sort_by(|&a, &b| {
        scan_order(
            (states[a].energy, states[a].time),
            (states[b].energy, states[b].time),
        )
    });

    let mut front = Vec::new();
    let mut best_time = f64::NEG_INFINITY;
    for idx in order {
        let time = states[idx].time;
        if front.is_empty() || time > best_time {
            front.push(idx);
            best_time = time;
        }
    }
    front
}
