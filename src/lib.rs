// src/lib.rs

pub mod config;
pub mod driver;
pub mod energy;
pub mod grid;
pub mod honeycomb;
pub mod params;
pub mod spin_field;
pub mod system;
pub mod vec3;
pub mod visualisation;

pub use driver::{DriveError, DriveReport, DriveSettings, Driver};
pub use energy::{compute_energy, site_energy, total_energy, EnergyBreakdown};
pub use honeycomb::HoneycombSpins;
pub use params::SystemParams;
pub use spin_field::{FieldError, SpinField};
pub use system::System;
