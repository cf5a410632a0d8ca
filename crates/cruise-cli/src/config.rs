//! CLI configuration from environment.

use cruise_core::{CruiseParameters, BACKOFF, PARETO_MAX, T0, W0};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backoff: usize,
    pub pareto_max: usize,
    pub w0: f64,
    pub t0: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backoff: BACKOFF,
            pareto_max: PARETO_MAX,
            w0: W0,
            t0: T0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unparsable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            backoff: lookup("CRUISE_BACKOFF")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.backoff),
            pareto_max: lookup("CRUISE_PARETO_MAX")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.pareto_max),
            w0: lookup("CRUISE_W0")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.w0),
            t0: lookup("CRUISE_T0")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.t0),
        }
    }

    pub fn parameters(&self) -> CruiseParameters {
        CruiseParameters {
            backoff: self.backoff,
            pareto_max: self.pareto_max,
        }
    }
}
