//! Query surface over the Pareto-optimal trajectories of one sweep.

use crate::reconstruct::TrajectoryPoint;
use serde::{Deserialize, Serialize};

/// Normalized per-waypoint profile of one trajectory, ready for plotting.
///
/// Height is divided by `n_h`, speed by `n_s`, energy and time by the seed
/// budget of the first trajectory so that all profiles share one scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub height: Vec<f64>,
    pub speed: Vec<f64>,
    pub energy: Vec<f64>,
    pub time: Vec<f64>,
}

/// Pareto-optimal trajectories, ordered along the final front (descending
/// remaining energy, ascending spare time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectories {
    paths: Vec<Vec<TrajectoryPoint>>,
    n_h: usize,
    n_s: usize,
}

impl Trajectories {
    pub fn new(paths: Vec<Vec<TrajectoryPoint>>, n_h: usize, n_s: usize) -> Self {
        Self { paths, n_h, n_s }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of waypoints swept (each trajectory holds `n_d + 1` points).
    pub fn n_d(&self) -> usize {
        self.paths.first().map_or(0, |path| path.len().saturating_sub(1))
    }

    pub fn n_h(&self) -> usize {
        self.n_h
    }

    pub fn n_s(&self) -> usize {
        self.n_s
    }

    /// Raw states of trajectory `i`, seed first.
    pub fn states(&self, i: usize) -> Option<&[TrajectoryPoint]> {
        self.paths.get(i).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[TrajectoryPoint]> {
        self.paths.iter().map(Vec::as_slice)
    }

    /// Normalized profile of trajectory `i`.
    pub fn profile(&self, i: usize) -> Option<Profile> {
        let path = self.paths.get(i)?;
        let reference = self.paths.first()?.first()?;
        let n_h = self.n_h as f64;
        let n_s = self.n_s as f64;
        Some(Profile {
            height: path.iter().map(|p| p.height as f64 / n_h).collect(),
            speed: path.iter().map(|p| p.speed as f64 / n_s).collect(),
            energy: path.iter().map(|p| p.energy / reference.energy).collect(),
            time: path.iter().map(|p| p.time / reference.time).collect(),
        })
    }

    /// Final (energy, time) of every trajectory, in front order.
    pub fn front(&self) -> (Vec<f64>, Vec<f64>) {
        self.paths
            .iter()
            .filter_map(|path| path.last())
            .map(|end| (end.energy, end.time))
            .unzip()
    }
}
