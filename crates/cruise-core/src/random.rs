//! Randomized cost model with global parameters and random terrain.
//!
//! Defaults are tuned for an airliner cruise (speeds in Mach, waypoints in
//! km) but nothing in the sweep depends on that interpretation.

use crate::error::Result;
use crate::models::{CostModel, CostModelSpec};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of heights
pub const N_H: usize = 8;
/// Default number of waypoints
pub const N_D: usize = 600;
/// Default number of speeds
pub const N_S: usize = 7;
/// Default min speed (Mach)
pub const S_MIN: f64 = 0.6;
/// Default max speed (Mach)
pub const S_MAX: f64 = 0.9;
/// Default waypoint length (km)
pub const WAYPOINT: f64 = 10.0;
/// Speed of sound (km/s)
pub const MAC: f64 = 0.3403;
/// Speed cost coefficient: a waypoint at speed `s` costs `SPEED_COST * s^2`
pub const SPEED_COST: f64 = 50.0;
pub const CRUISE_COST: f64 = 20.0;
pub const CLIMB_COST: f64 = 100.0;
pub const DOWN_GAIN: f64 = 25.0;
/// Cost reduction per height level
pub const HEIGHT_GAIN: f64 = 3.0;
/// Remaining energy that adds one unit of cost per waypoint
pub const INVERSE_WEIGHT: f64 = 4000.0;

/// Builder for a random [`CostModel`].
///
/// Terrain matrices are drawn uniformly in `[0.5, 1.5)` times their base
/// cost. With a seed, generation is reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct CostRandom {
    n_h: usize,
    n_d: usize,
    n_s: usize,
    s_min: f64,
    s_max: f64,
    waypoint: f64,
    mac: f64,
    speed_cost: f64,
    cruise_cost: f64,
    climb_cost: f64,
    down_gain: f64,
    height_gain: f64,
    inverse_weight: f64,
    seed: Option<u64>,
}

impl Default for CostRandom {
    fn default() -> Self {
        Self {
            n_h: N_H,
            n_d: N_D,
            n_s: N_S,
            s_min: S_MIN,
            s_max: S_MAX,
            waypoint: WAYPOINT,
            mac: MAC,
            speed_cost: SPEED_COST,
            cruise_cost: CRUISE_COST,
            climb_cost: CLIMB_COST,
            down_gain: DOWN_GAIN,
            height_gain: HEIGHT_GAIN,
            inverse_weight: INVERSE_WEIGHT,
            seed: None,
        }
    }
}

impl CostRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_h(mut self, n_h: usize) -> Self {
        self.n_h = n_h;
        self
    }

    pub fn n_d(mut self, n_d: usize) -> Self {
        self.n_d = n_d;
        self
    }

    pub fn n_s(mut self, n_s: usize) -> Self {
        self.n_s = n_s;
        self
    }

    /// Speed range, in units of `mac`.
    pub fn speed_range(mut self, s_min: f64, s_max: f64) -> Self {
        self.s_min = s_min;
        self.s_max = s_max;
        self
    }

    pub fn waypoint(mut self, waypoint: f64) -> Self {
        self.waypoint = waypoint;
        self
    }

    pub fn mac(mut self, mac: f64) -> Self {
        self.mac = mac;
        self
    }

    pub fn speed_cost(mut self, speed_cost: f64) -> Self {
        self.speed_cost = speed_cost;
        self
    }

    pub fn cruise_cost(mut self, cruise_cost: f64) -> Self {
        self.cruise_cost = cruise_cost;
        self
    }

    pub fn climb_cost(mut self, climb_cost: f64) -> Self {
        self.climb_cost = climb_cost;
        self
    }

    pub fn down_gain(mut self, down_gain: f64) -> Self {
        self.down_gain = down_gain;
        self
    }

    pub fn height_gain(mut self, height_gain: f64) -> Self {
        self.height_gain = height_gain;
        self
    }

    pub fn inverse_weight(mut self, inverse_weight: f64) -> Self {
        self.inverse_weight = inverse_weight;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Speed levels, evenly spaced from `s_min` to `s_max` inclusive.
    pub fn speeds(&self) -> Vec<f64> {
        match self.n_s {
            0 => Vec::new(),
            1 => vec![self.s_min],
            n => {
                let step = (self.s_max - self.s_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.s_max
                        } else {
                            self.s_min + i as f64 * step
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn build(&self) -> Result<CostModel> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let speeds = self.speeds();
        let timings = speeds
            .iter()
            .map(|speed| self.waypoint / self.mac / speed)
            .collect();
        let speed_cost = speeds
            .iter()
            .map(|speed| self.speed_cost * speed * speed)
            .collect();

        let cruise_cost = self.terrain(&mut rng, self.cruise_cost);
        let climb_cost = self.terrain(&mut rng, self.climb_cost);
        let descend_gain = self.terrain(&mut rng, self.down_gain);

        CostModel::new(CostModelSpec {
            timings,
            speed_cost,
            cruise_cost,
            climb_cost,
            descend_gain,
            height_gain: self.height_gain,
            weight_cost: 1.0 / self.inverse_weight,
            n_h: Some(self.n_h),
        })
    }

    fn terrain(&self, rng: &mut StdRng, scale: f64) -> Vec<Vec<f64>> {
        (0..self.n_d)
            .map(|_| {
                (0..self.n_h)
                    .map(|_| scale * (0.5 + rng.random::<f64>()))
                    .collect()
            })
            .collect()
    }
}
