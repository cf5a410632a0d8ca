//! Waypoint-by-waypoint dynamic programming sweep.
//!
//! Layer `i + 1` is built from the complete, reduced layer `i`, so waypoints
//! are processed strictly in order. Every finalized layer is kept in the
//! [`Sweep`] arena until trajectories have been reconstructed; states refer to
//! their predecessor by position in the previous layer.

use crate::config::CruiseParameters;
use crate::error::{CruiseError, Result};
use crate::models::CostModel;
use crate::pareto::{global_front, ParetoFilter};
use crate::reconstruct::TrajectoryReconstructor;
use crate::state::WaypointLayer;
use crate::store::StateStore;
use crate::trajectories::Trajectories;
use crate::transition::TransitionEngine;

/// Source states expanded per rayon task.
#[cfg(feature = "parallel")]
const EXPANSION_CHUNK: usize = 512;

/// Result of a full sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepOutcome {
    Feasible(Trajectories),
    /// No state survived to the last waypoint.
    Infeasible,
}

impl SweepOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    pub fn trajectories(&self) -> Option<&Trajectories> {
        match self {
            Self::Feasible(trajectories) => Some(trajectories),
            Self::Infeasible => None,
        }
    }

    pub fn into_trajectories(self) -> Option<Trajectories> {
        match self {
            Self::Feasible(trajectories) => Some(trajectories),
            Self::Infeasible => None,
        }
    }
}

/// Retained layers of one sweep, seed layer first.
#[derive(Debug, Clone)]
pub struct Sweep {
    layers: Vec<WaypointLayer>,
    endpoints: Vec<usize>,
    n_h: usize,
    n_s: usize,
}

impl Sweep {
    pub fn layers(&self) -> &[WaypointLayer] {
        &self.layers
    }

    /// Positions in the last layer forming its exact, unsampled front.
    pub fn endpoints(&self) -> &[usize] {
        &self.endpoints
    }

    /// Reconstructs every front trajectory and releases the layers.
    pub fn into_outcome(self) -> Result<SweepOutcome> {
        if self.endpoints.is_empty() {
            return Ok(SweepOutcome::Infeasible);
        }
        let paths = TrajectoryReconstructor::new(&self.layers).backtrack_all(&self.endpoints)?;
        let trajectories = Trajectories::new(paths, self.n_h, self.n_s);
        Ok(SweepOutcome::Feasible(trajectories))
    }
}

/// Driver for the cruise optimization.
///
/// ```
/// use cruise_core::{CostRandom, Cruise, CruiseParameters};
///
/// let model = CostRandom::new().n_d(20).seed(42).build().unwrap();
/// let params = CruiseParameters { backoff: 3, pareto_max: 5 };
/// let cruise = Cruise::new(model, params).unwrap();
/// let outcome = cruise.compute_single(26_000.0, 26_000.0).unwrap();
/// let trajectories = outcome.trajectories().unwrap();
/// let (energy, time) = trajectories.front();
/// assert!(energy.windows(2).all(|w| w[0] > w[1]));
/// assert!(time.windows(2).all(|w| w[0] < w[1]));
/// ```
#[derive(Debug, Clone)]
pub struct Cruise {
    model: CostModel,
    parameters: CruiseParameters,
}

impl Cruise {
    pub fn new(model: CostModel, parameters: CruiseParameters) -> Result<Self> {
        parameters.validate()?;
        Ok(Self { model, parameters })
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    pub fn parameters(&self) -> &CruiseParameters {
        &self.parameters
    }

    /// Runs the sweep from a single budget.
    pub fn compute_single(&self, energy: f64, time: f64) -> Result<SweepOutcome> {
        self.compute(&[(energy, time)])
    }

    /// Runs the sweep from a set of initial `(energy, time)` budgets and
    /// reconstructs the final front.
    pub fn compute(&self, budgets: &[(f64, f64)]) -> Result<SweepOutcome> {
        self.sweep(budgets)?.into_outcome()
    }

    /// Runs the sweep and returns the retained layers without reconstructing.
    pub fn sweep(&self, budgets: &[(f64, f64)]) -> Result<Sweep> {
        validate_budgets(budgets)?;

        let model = &self.model;
        let span = tracing::info_span!(
            "sweep",
            n_d = model.n_d(),
            n_h = model.n_h(),
            n_s = model.n_s()
        );
        let _guard = span.enter();

        let engine = TransitionEngine::new(model, self.parameters.backoff);
        let filter = ParetoFilter::new(self.parameters.pareto_max);

        let mut layers = Vec::with_capacity(model.n_d() + 1);
        layers.push(WaypointLayer::seed(budgets));
        for waypoint in 0..model.n_d() {
            let current = &layers[waypoint];
            let mut store = expand(&engine, waypoint, current);
            let candidates = store.candidate_count();
            filter.collapse(&mut store);
            let next = store.into_layer();
            tracing::debug!(
                waypoint,
                candidates,
                buckets = next.bucket_count(),
                states = next.len(),
                "layer finalized"
            );
            let exhausted = next.is_empty();
            layers.push(next);
            if exhausted {
                tracing::warn!(waypoint, "no feasible state left; sweep is infeasible");
                break;
            }
        }

        let endpoints = layers.last().map(global_front).unwrap_or_default();
        tracing::info!(front = endpoints.len(), "sweep complete");
        Ok(Sweep {
            layers,
            endpoints,
            n_h: model.n_h(),
            n_s: model.n_s(),
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn expand(engine: &TransitionEngine<'_>, waypoint: usize, layer: &WaypointLayer) -> StateStore {
    engine.expand_layer(waypoint, layer)
}

/// Expands fixed chunks of the layer on the rayon pool and merges the
/// partial stores in chunk order, which keeps bucket contents identical to
/// the sequential expansion.
#[cfg(feature = "parallel")]
fn expand(engine: &TransitionEngine<'_>, waypoint: usize, layer: &WaypointLayer) -> StateStore {
    use rayon::iter::IntoParallelIterator;
    use rayon::iter::ParallelIterator;

    let len = layer.len();
    let chunks = len.div_ceil(EXPANSION_CHUNK);
    let partials = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * EXPANSION_CHUNK;
            let end = (start + EXPANSION_CHUNK).min(len);
            let mut store = StateStore::new();
            engine.expand_range(waypoint, layer, start, end, &mut store);
            store
        })
        .collect::<Vec<StateStore>>();

    let mut store = StateStore::new();
    for partial in partials {
        store.merge(partial);
    }
    store
}

fn validate_budgets(budgets: &[(f64, f64)]) -> Result<()> {
    if budgets.is_empty() {
        return Err(CruiseError::EmptyBudgets);
    }
    for (index, &(energy, time)) in budgets.iter().enumerate() {
        let valid = energy.is_finite() && time.is_finite() && energy > 0.0 && time > 0.0;
        if !valid {
            return Err(CruiseError::InvalidBudget {
                index,
                energy,
                time,
            });
        }
    }
    Ok(())
}
