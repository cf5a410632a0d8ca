//! Successor enumeration from one waypoint to the next.

use crate::models::CostModel;
use crate::state::{Candidate, State, StateKey, WaypointLayer};
use crate::store::StateStore;

/// Expands states at waypoint `i` into candidates at waypoint `i + 1`.
///
/// Per state, the vehicle may keep its height, climb one level or descend
/// one level. Speed may change only when the lockout counter is zero, and
/// doing so re-arms the lockout to `backoff` waypoints.
#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'a> {
    model: &'a CostModel,
    backoff: usize,
}

impl<'a> TransitionEngine<'a> {
    pub fn new(model: &'a CostModel, backoff: usize) -> Self {
        Self { model, backoff }
    }

    /// Emits every feasible successor of `state` (at position `parent` in the
    /// layer of `waypoint`) into `store`.
    pub fn expand(&self, waypoint: usize, parent: usize, state: &State, store: &mut StateStore) {
        let model = self.model;
        let StateKey {
            height,
            speed,
            backoff,
        } = state.key;
        // remaining energy makes every waypoint more expensive
        let base_cost = model.cruise_cost(waypoint, height) - height as f64 * model.height_gain()
            + state.energy * model.weight_cost();

        let step = Step {
            waypoint,
            height,
            parent,
            energy: state.energy,
            time: state.time,
            base_cost,
        };

        self.emit(&step, speed, backoff.saturating_sub(1), store);
        if backoff == 0 {
            for other in (0..model.n_s()).filter(|&other| other != speed) {
                self.emit(&step, other, self.backoff, store);
            }
        }
    }

    /// Expands a whole layer into a fresh store.
    pub fn expand_layer(&self, waypoint: usize, layer: &WaypointLayer) -> StateStore {
        let mut store = StateStore::new();
        self.expand_range(waypoint, layer, 0, layer.len(), &mut store);
        store
    }

    /// Expands layer positions `start..end` into `store`.
    pub(crate) fn expand_range(
        &self,
        waypoint: usize,
        layer: &WaypointLayer,
        start: usize,
        end: usize,
        store: &mut StateStore,
    ) {
        for (offset, state) in layer.states()[start..end].iter().enumerate() {
            self.expand(waypoint, start + offset, state, store);
        }
    }

    /// Same-height, climb and descend successors at speed `speed`.
    fn emit(&self, step: &Step, speed: usize, backoff: usize, store: &mut StateStore) {
        let model = self.model;
        let energy = step.energy - (step.base_cost + model.speed_cost(speed)).max(0.0);
        let time = step.time - model.timing(speed);
        let parent = Some(step.parent);

        store.insert(
            StateKey::new(step.height, speed, backoff),
            Candidate::new(energy, time, parent),
        );
        if step.height + 1 < model.n_h() {
            let climb = model.climb_cost(step.waypoint, step.height);
            store.insert(
                StateKey::new(step.height + 1, speed, backoff),
                Candidate::new(energy - climb, time, parent),
            );
        }
        if step.height > 0 {
            let gain = model.descend_gain(step.waypoint, step.height);
            store.insert(
                StateKey::new(step.height - 1, speed, backoff),
                Candidate::new(energy + gain, time, parent),
            );
        }
    }
}

struct Step {
    waypoint: usize,
    height: usize,
    parent: usize,
    energy: f64,
    time: f64,
    base_cost: f64,
}
