// src/config.rs

use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::driver::DriveSettings;
use crate::params::SystemParams;

/// Run configuration record, written as config.json next to the outputs so a
/// run can be identified later.
#[derive(Serialize)]
pub struct RunConfig {
    pub lattice: LatticeConfig,
    pub hamiltonian: HamiltonianConfig,
    pub relaxation: RelaxationConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct LatticeConfig {
    pub nx: usize,
    pub ny: usize,
}

#[derive(Serialize)]
pub struct HamiltonianConfig {
    pub b_ext: [f64; 3],
    pub k_u: f64,
    pub easy_axis: [f64; 3],
    pub j_ex: f64,
    pub dmi: f64,
}

#[derive(Serialize)]
pub struct RelaxationConfig {
    pub iterations: i64,
    pub alpha: f64,
    pub energy_stride: usize,
    pub seed: u64,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    pub run_id: String,
}

impl HamiltonianConfig {
    pub fn from_params(p: &SystemParams) -> Self {
        Self {
            b_ext: p.b_ext,
            k_u: p.k_u,
            easy_axis: p.easy_axis,
            j_ex: p.j_ex,
            dmi: p.dmi,
        }
    }
}

impl RelaxationConfig {
    pub fn new(iterations: i64, settings: &DriveSettings, seed: u64) -> Self {
        Self {
            iterations,
            alpha: settings.alpha,
            energy_stride: settings.energy_stride,
            seed,
        }
    }
}

impl RunConfig {
    pub fn write_to_dir(&self, out_dir: &Path) -> std::io::Result<()> {
        let path = out_dir.join("config.json");
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
