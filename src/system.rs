// src/system.rs

use crate::energy::{compute_energy, total_energy, EnergyBreakdown};
use crate::params::SystemParams;
use crate::spin_field::SpinField;

/// A spin configuration together with the Hamiltonian parameters.
///
/// Owns the field exclusively; the driver mutates it through a mutable
/// reference for the duration of a run. Parameters are immutable once the
/// system is built.
#[derive(Debug, Clone)]
pub struct System {
    pub s: SpinField,
    pub params: SystemParams,
}

impl System {
    pub fn new(s: SpinField, params: SystemParams) -> Self {
        Self { s, params }
    }

    /// Total energy of the current configuration.
    pub fn energy(&self) -> f64 {
        total_energy(&self.s, &self.params)
    }

    /// Per-term energy totals of the current configuration.
    pub fn energy_breakdown(&self) -> EnergyBreakdown {
        compute_energy(&self.s, &self.params)
    }

    /// Mean spin vector over the lattice.
    pub fn mean(&self) -> [f64; 3] {
        self.s.mean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn system_energy_matches_free_function() {
        let s = SpinField::new(2, 2).unwrap();
        let params = SystemParams::zeeman_only([0.0, 0.0, 1.0]);
        let system = System::new(s, params);
        assert_relative_eq!(system.energy(), -4.0);
        assert_relative_eq!(system.energy_breakdown().total(), system.energy());
        assert_eq!(system.mean(), [0.0, 0.0, 1.0]);
    }
}
