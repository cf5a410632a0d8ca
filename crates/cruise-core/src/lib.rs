//! Pareto-optimal cruise trajectories trading remaining energy against spare
//! time, over discrete height, speed and speed-change lockout states.

pub mod config;
pub mod error;
pub mod models;
pub mod pareto;
pub mod random;
pub mod reconstruct;
pub mod state;
pub mod store;
pub mod sweep;
pub mod trajectories;
pub mod transition;

pub use config::{CruiseParameters, BACKOFF, PARETO_MAX, T0, W0};
pub use error::{CruiseError, Result};
pub use models::{CostModel, CostModelSpec};
pub use pareto::{dominates, global_front, ParetoFilter};
pub use random::CostRandom;
pub use reconstruct::{TrajectoryPoint, TrajectoryReconstructor};
pub use state::{Candidate, State, StateKey, WaypointLayer};
pub use store::StateStore;
pub use sweep::{Cruise, Sweep, SweepOutcome};
pub use trajectories::{Profile, Trajectories};
pub use transition::TransitionEngine;
