//! Sweep parameters and default budgets.

use crate::error::{CruiseError, Result};
use serde::{Deserialize, Serialize};

/// Default energy (weight) budget.
pub const W0: f64 = 26_000.0;
/// Default time budget.
pub const T0: f64 = 26_000.0;
/// Default lockout, in waypoints, after a speed change.
pub const BACKOFF: usize = 9;
/// Default number of Pareto points kept per discrete state.
pub const PARETO_MAX: usize = 30;

/// Configuration for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseParameters {
    /// Waypoints during which speed is frozen after a speed change
    pub backoff: usize,
    /// Max number of Pareto points retained per (height, speed, backoff) bucket
    pub pareto_max: usize,
}

impl Default for CruiseParameters {
    fn default() -> Self {
        Self {
            backoff: BACKOFF,
            pareto_max: PARETO_MAX,
        }
    }
}

impl CruiseParameters {
    pub fn validate(&self) -> Result<()> {
        if self.pareto_max == 0 {
            return Err(CruiseError::invalid_config("pareto_max must be at least 1"));
        }
        Ok(())
    }
}
