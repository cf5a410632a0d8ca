//! Backtracking from final-layer endpoints to the seed layer.

use crate::error::{CruiseError, Result};
use crate::state::WaypointLayer;
use serde::{Deserialize, Serialize};

/// One waypoint of a reconstructed trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub height: usize,
    pub speed: usize,
    pub energy: f64,
    pub time: f64,
}

/// Walks backreferences through the retained layers of one sweep.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryReconstructor<'a> {
    layers: &'a [WaypointLayer],
}

impl<'a> TrajectoryReconstructor<'a> {
    pub fn new(layers: &'a [WaypointLayer]) -> Self {
        Self { layers }
    }

    /// Rebuilds the trajectory ending at `endpoint` in the last layer, in
    /// forward order, one point per layer.
    pub fn backtrack(&self, endpoint: usize) -> Result<Vec<TrajectoryPoint>> {
        let Some(last) = self.layers.len().checked_sub(1) else {
            return Err(CruiseError::BrokenBackreference {
                layer: 0,
                position: endpoint,
            });
        };

        let mut points = Vec::with_capacity(self.layers.len());
        let mut position = endpoint;
        for layer_idx in (0..=last).rev() {
            let state = self.layers[layer_idx].get(position).ok_or(
                CruiseError::BrokenBackreference {
                    layer: layer_idx,
                    position,
                },
            )?;
            points.push(TrajectoryPoint {
                height: state.key.height,
                speed: state.key.speed,
                energy: state.energy,
                time: state.time,
            });
            if layer_idx > 0 {
                position = state.parent.ok_or(CruiseError::BrokenBackreference {
                    layer: layer_idx,
                    position,
                })?;
            }
        }
        points.reverse();
        Ok(points)
    }

    /// Rebuilds one trajectory per endpoint, in endpoint order.
    pub fn backtrack_all(&self, endpoints: &[usize]) -> Result<Vec<Vec<TrajectoryPoint>>> {
        endpoints
            .iter()
            .map(|&endpoint| self.backtrack(endpoint))
            .collect()
    }
}
