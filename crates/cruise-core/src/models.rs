//! Cost model for the cruise sweep.
//!
//! All values are expressed in units per waypoint. "Height" is any discrete
//! state dimension (altitude, depth, lane) and "weight" is the remaining
//! energy (fuel, charge) that the vehicle carries.

use crate::error::{CruiseError, Result};
use serde::{Deserialize, Serialize};

/// Raw, unvalidated cost model arrays as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModelSpec {
    /// Time to travel one waypoint, per speed index.
    pub timings: Vec<f64>,
    /// Energy cost to travel one waypoint, per speed index.
    pub speed_cost: Vec<f64>,
    /// Base cost per waypoint and height.
    pub cruise_cost: Vec<Vec<f64>>,
    /// Extra cost to climb one level, per waypoint and height.
    pub climb_cost: Vec<Vec<f64>>,
    /// Energy recovered when descending one level, per waypoint and height.
    pub descend_gain: Vec<Vec<f64>>,
    /// Cost reduction per height index.
    pub height_gain: f64,
    /// Cost increase per unit of remaining energy.
    pub weight_cost: f64,
    /// Number of height levels. Inferred from the first matrix row when
    /// absent; required for a model without waypoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_h: Option<usize>,
}

/// Validated cost model. Every matrix shares `n_d` rows of `n_h >= 1` columns
/// and both speed vectors have `n_s >= 1` entries. `n_d` may be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CostModelSpec", into = "CostModelSpec")]
pub struct CostModel {
    timings: Vec<f64>,
    speed_cost: Vec<f64>,
    cruise_cost: Vec<Vec<f64>>,
    climb_cost: Vec<Vec<f64>>,
    descend_gain: Vec<Vec<f64>>,
    height_gain: f64,
    weight_cost: f64,
    n_h: usize,
}

impl CostModel {
    pub fn new(spec: CostModelSpec) -> Result<Self> {
        let n_s = spec.timings.len();
        if n_s == 0 {
            return Err(CruiseError::invalid_model("at least one speed level is required"));
        }
        if spec.speed_cost.len() != n_s {
            return Err(CruiseError::invalid_model(format!(
                "speed_cost has {} entries, timings has {}",
                spec.speed_cost.len(),
                n_s
            )));
        }
        check_finite("timings", &spec.timings)?;
        check_finite("speed_cost", &spec.speed_cost)?;

        let n_d = spec.cruise_cost.len();
        let n_h = match (spec.n_h, spec.cruise_cost.first()) {
            (Some(n_h), _) => n_h,
            (None, Some(row)) => row.len(),
            (None, None) => {
                return Err(CruiseError::invalid_model(
                    "n_h is required for a model without waypoints",
                ))
            }
        };
        if n_h == 0 {
            return Err(CruiseError::invalid_model("at least one height level is required"));
        }
        for (name, matrix) in [
            ("cruise_cost", &spec.cruise_cost),
            ("climb_cost", &spec.climb_cost),
            ("descend_gain", &spec.descend_gain),
        ] {
            check_matrix(name, matrix, n_d, n_h)?;
        }

        if !spec.height_gain.is_finite() || !spec.weight_cost.is_finite() {
            return Err(CruiseError::invalid_model(
                "height_gain and weight_cost must be finite",
            ));
        }

        Ok(Self {
            timings: spec.timings,
            speed_cost: spec.speed_cost,
            cruise_cost: spec.cruise_cost,
            climb_cost: spec.climb_cost,
            descend_gain: spec.descend_gain,
            height_gain: spec.height_gain,
            weight_cost: spec.weight_cost,
            n_h,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: CostModelSpec = serde_json::from_str(json)?;
        Self::new(spec)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of waypoints.
    pub fn n_d(&self) -> usize {
        self.cruise_cost.len()
    }

    /// Number of height levels.
    pub fn n_h(&self) -> usize {
        self.n_h
    }

    /// Number of speed levels.
    pub fn n_s(&self) -> usize {
        self.timings.len()
    }

    pub fn timing(&self, speed: usize) -> f64 {
        self.timings[speed]
    }

    pub fn speed_cost(&self, speed: usize) -> f64 {
        self.speed_cost[speed]
    }

    pub fn cruise_cost(&self, waypoint: usize, height: usize) -> f64 {
        self.cruise_cost[waypoint][height]
    }

    pub fn climb_cost(&self, waypoint: usize, height: usize) -> f64 {
        self.climb_cost[waypoint][height]
    }

    pub fn descend_gain(&self, waypoint: usize, height: usize) -> f64 {
        self.descend_gain[waypoint][height]
    }

    pub fn height_gain(&self) -> f64 {
        self.height_gain
    }

    pub fn weight_cost(&self) -> f64 {
        self.weight_cost
    }
}

impl TryFrom<CostModelSpec> for CostModel {
    type Error = CruiseError;

    fn try_from(spec: CostModelSpec) -> Result<Self> {
        Self::new(spec)
    }
}

impl From<CostModel> for CostModelSpec {
    fn from(model: CostModel) -> Self {
        Self {
            timings: model.timings,
            speed_cost: model.speed_cost,
            cruise_cost: model.cruise_cost,
            climb_cost: model.climb_cost,
            descend_gain: model.descend_gain,
            height_gain: model.height_gain,
            weight_cost: model.weight_cost,
            n_h: Some(model.n_h),
        }
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(idx) => Err(CruiseError::invalid_model(format!(
            "{name}[{idx}] is not finite"
        ))),
        None => Ok(()),
    }
}

fn check_matrix(name: &str, matrix: &[Vec<f64>], n_d: usize, n_h: usize) -> Result<()> {
    if matrix.len() != n_d {
        return Err(CruiseError::invalid_model(format!(
            "{name} has {} waypoint rows, expected {n_d}",
            matrix.len()
        )));
    }
    for (waypoint, row) in matrix.iter().enumerate() {
        if row.len() != n_h {
            return Err(CruiseError::invalid_model(format!(
                "{name} row {waypoint} has {} heights, expected {n_h}",
                row.len()
            )));
        }
        check_finite(name, row)?;
    }
    Ok(())
}
