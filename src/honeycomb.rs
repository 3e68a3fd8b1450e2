// src/honeycomb.rs
//
// Two-sublattice spin field on a honeycomb lattice. Each unit cell carries
// one A and one B spin; the unit-norm invariant matches the rectangular
// field. Descriptive reductions (mean, magnetization) only; no energy model
// or dynamics are defined on this lattice.

use rand::Rng;

use crate::spin_field::{random_unit_spin, FieldError, NORM2_EPS};
use crate::vec3::{dot, try_normalize};

/// Sublattice label within a honeycomb unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sublattice {
    A,
    B,
}

/// Field of spins on an na × nb honeycomb lattice, stored as a pair of spins
/// per unit cell.
#[derive(Debug, Clone)]
pub struct HoneycombSpins {
    pub na: usize,
    pub nb: usize,
    /// Cell (a, b) sublattice A at `data[idx(a, b)][0]`, sublattice B at `[1]`.
    pub data: Vec<[[f64; 3]; 2]>,
}

impl HoneycombSpins {
    /// Create a honeycomb field with every spin initialised to `value`
    /// (normalised). Defaults via `new` to +z.
    pub fn with_value(na: usize, nb: usize, value: [f64; 3]) -> Result<Self, FieldError> {
        if na == 0 || nb == 0 {
            return Err(FieldError::Shape { nx: na, ny: nb });
        }
        let unit = try_normalize(value).ok_or(FieldError::DegenerateSpin { x: 0, y: 0 })?;
        Ok(Self {
            na,
            nb,
            data: vec![[unit, unit]; na * nb],
        })
    }

    pub fn new(na: usize, nb: usize) -> Result<Self, FieldError> {
        Self::with_value(na, nb, [0.0, 0.0, 1.0])
    }

    #[inline]
    pub fn idx(&self, a: usize, b: usize) -> usize {
        debug_assert!(a < self.na && b < self.nb);
        b * self.na + a
    }

    /// Spin at cell (a, b) on the given sublattice.
    #[inline]
    pub fn get(&self, a: usize, b: usize, sub: Sublattice) -> [f64; 3] {
        self.data[self.idx(a, b)][sub as usize]
    }

    /// Replace every spin on both sublattices with an independent isotropic
    /// unit vector.
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.data {
            cell[0] = random_unit_spin(rng);
            cell[1] = random_unit_spin(rng);
        }
    }

    /// Rescale every spin to unit norm; fails on a zero-length spin.
    pub fn normalise(&mut self) -> Result<(), FieldError> {
        for b in 0..self.nb {
            for a in 0..self.na {
                let idx = self.idx(a, b);
                for s in &self.data[idx] {
                    if dot(*s, *s) < NORM2_EPS {
                        return Err(FieldError::DegenerateSpin { x: a, y: b });
                    }
                }
            }
        }
        for cell in &mut self.data {
            for s in cell.iter_mut() {
                if let Some(unit) = try_normalize(*s) {
                    *s = unit;
                }
            }
        }
        Ok(())
    }

    /// Mean spin vector over both sublattices.
    pub fn mean(&self) -> [f64; 3] {
        let sum = self.magnetization();
        let inv = 1.0 / (2 * self.na * self.nb) as f64;
        [sum[0] * inv, sum[1] * inv, sum[2] * inv]
    }

    /// Net magnetization: component-wise sum over both sublattices.
    pub fn magnetization(&self) -> [f64; 3] {
        let mut sum = [0.0; 3];
        for cell in &self.data {
            for s in cell {
                sum[0] += s[0];
                sum[1] += s[1];
                sum[2] += s[2];
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::norm;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn construction_fills_both_sublattices() {
        let h = HoneycombSpins::new(3, 2).unwrap();
        assert_eq!(h.get(2, 1, Sublattice::A), [0.0, 0.0, 1.0]);
        assert_eq!(h.get(2, 1, Sublattice::B), [0.0, 0.0, 1.0]);
        assert_eq!(h.magnetization(), [0.0, 0.0, 12.0]);
        assert_eq!(h.mean(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            HoneycombSpins::new(0, 2).unwrap_err(),
            FieldError::Shape { nx: 0, ny: 2 }
        );
    }

    #[test]
    fn randomise_keeps_unit_norms_on_both_sublattices() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let mut h = HoneycombSpins::new(4, 4).unwrap();
        h.randomise(&mut rng);
        for cell in &h.data {
            for s in cell {
                assert!((norm(*s) - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn normalise_reports_degenerate_cell() {
        let mut h = HoneycombSpins::new(2, 2).unwrap();
        let idx = h.idx(1, 0);
        h.data[idx][1] = [0.0, 0.0, 0.0];
        assert_eq!(
            h.normalise().unwrap_err(),
            FieldError::DegenerateSpin { x: 1, y: 0 }
        );
    }
}
