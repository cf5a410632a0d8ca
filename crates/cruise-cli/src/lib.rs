//! Cruise CLI - runs the trajectory sweep on a JSON or randomized cost model
//! and writes a JSON report of the resulting front.

pub mod config;
pub mod report;
pub mod telemetry;

pub use config::Config;
pub use report::{write_atomic, Front, Report};
