//! JSON report of one sweep, written atomically.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use cruise_core::{CostModel, CruiseParameters, Profile, SweepOutcome};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Front {
    pub energy: Vec<f64>,
    pub time: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub parameters: CruiseParameters,
    pub n_d: usize,
    pub n_h: usize,
    pub n_s: usize,
    pub budget: (f64, f64),
    pub feasible: bool,
    pub trajectory_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<Front>,
    /// Profile of the energy-optimal trajectory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_optimal: Option<Profile>,
    /// Profile of the time-optimal trajectory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_optimal: Option<Profile>,
}

impl Report {
    pub fn new(
        model: &CostModel,
        parameters: CruiseParameters,
        budget: (f64, f64),
        outcome: &SweepOutcome,
    ) -> Self {
        let trajectories = outcome.trajectories();
        let front = trajectories.map(|t| {
            let (energy, time) = t.front();
            Front { energy, time }
        });
        Self {
            generated_at: Utc::now(),
            parameters,
            n_d: model.n_d(),
            n_h: model.n_h(),
            n_s: model.n_s(),
            budget,
            feasible: outcome.is_feasible(),
            trajectory_count: trajectories.map_or(0, |t| t.len()),
            front,
            energy_optimal: trajectories.and_then(|t| t.profile(0)),
            time_optimal: trajectories.and_then(|t| t.profile(t.len().saturating_sub(1))),
        }
    }

    /// Writes the report to `path`. Returns `false` without touching the
    /// file if it exists and `overwrite` is not set.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<bool> {
        if path.exists() && !overwrite {
            return Ok(false);
        }
        write_atomic(path, |writer| {
            serde_json::to_writer_pretty(&mut *writer, self)?;
            writer.write_all(b"\n")?;
            Ok(())
        })?;
        Ok(true)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let report = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(report)
    }
}

/// Writes through a temporary file in the destination directory, then
/// renames it over `path`. The temporary file is removed on failure.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let Some(name) = path.file_name() else {
        bail!("{} is not a file path", path.display());
    };
    let mut tmp_name = name.to_os_string();
    tmp_name.push(format!(".tmp{}", std::process::id()));
    let tmp_path: PathBuf = path.with_file_name(tmp_name);

    let result = (|| -> Result<()> {
        let file = File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming into {}", path.display()))?;
        Ok(())
    })();

    if result.is_err() && tmp_path.exists() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
