// src/spin_field.rs

use rand::Rng;
use thiserror::Error;

use crate::grid::Grid2D;
use crate::vec3::{dot, try_normalize};

/// Tolerance below which a squared norm is treated as degenerate.
pub(crate) const NORM2_EPS: f64 = 1e-24;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("lattice dimensions must be positive, got nx={nx}, ny={ny}")]
    Shape { nx: usize, ny: usize },

    #[error("cannot normalise a zero-length spin at site ({x}, {y})")]
    DegenerateSpin { x: usize, y: usize },
}

/// Field of classical spins on a 2D rectangular lattice with periodic
/// boundary conditions. Each site stores a unit-norm vector (sx, sy, sz).
///
/// The unit-norm invariant is established at construction and re-asserted
/// after every mutation; a zero vector is never representable through the
/// public API except via `set`, which `validate` exists to catch.
#[derive(Debug, Clone)]
pub struct SpinField {
    pub grid: Grid2D,
    pub data: Vec<[f64; 3]>,
}

impl SpinField {
    /// Create a field with every spin initialised along +z.
    pub fn new(nx: usize, ny: usize) -> Result<Self, FieldError> {
        Self::with_value(nx, ny, [0.0, 0.0, 1.0])
    }

    /// Create a field with every spin initialised to `value` (normalised).
    pub fn with_value(nx: usize, ny: usize, value: [f64; 3]) -> Result<Self, FieldError> {
        if nx == 0 || ny == 0 {
            return Err(FieldError::Shape { nx, ny });
        }
        let unit = try_normalize(value).ok_or(FieldError::DegenerateSpin { x: 0, y: 0 })?;
        let grid = Grid2D::new(nx, ny);
        Ok(Self {
            grid,
            data: vec![unit; grid.n_sites()],
        })
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        self.grid.idx(x, y)
    }

    /// Spin at site (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f64; 3] {
        self.data[self.grid.idx(x, y)]
    }

    /// Overwrite the spin at site (x, y). The caller is responsible for the
    /// unit-norm invariant; `normalise` or `validate` re-establish/check it.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, s: [f64; 3]) {
        let idx = self.grid.idx(x, y);
        self.data[idx] = s;
    }

    /// Replace every spin with an independent isotropic unit vector.
    ///
    /// Uses Marsaglia rejection sampling: draw from the cube [-1, 1]^3 until
    /// the point falls inside the unit ball (away from the origin), then
    /// project onto the sphere. The unit-norm invariant holds afterward.
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for s in &mut self.data {
            *s = random_unit_spin(rng);
        }
    }

    /// Rescale every spin to unit norm in place.
    ///
    /// Fails with `DegenerateSpin` on the first zero-length spin found; the
    /// field is left untouched in that case.
    pub fn normalise(&mut self) -> Result<(), FieldError> {
        self.validate()?;
        for s in &mut self.data {
            // validate() guarantees a non-zero norm here.
            if let Some(unit) = try_normalize(*s) {
                *s = unit;
            }
        }
        Ok(())
    }

    /// Read-only scan for degenerate (zero-length) spins.
    pub fn validate(&self) -> Result<(), FieldError> {
        for y in 0..self.grid.ny {
            for x in 0..self.grid.nx {
                let s = self.data[self.grid.idx(x, y)];
                if dot(s, s) < NORM2_EPS {
                    return Err(FieldError::DegenerateSpin { x, y });
                }
            }
        }
        Ok(())
    }

    /// The four periodic nearest-neighbour spins of site (x, y), in
    /// +x, -x, +y, -y order.
    pub fn neighbors(&self, x: usize, y: usize) -> [[f64; 3]; 4] {
        let g = self.grid;
        let (xr, _) = g.shift(x, y, 1, 0);
        let (xl, _) = g.shift(x, y, -1, 0);
        let (_, yu) = g.shift(x, y, 0, 1);
        let (_, yd) = g.shift(x, y, 0, -1);
        [
            self.data[g.idx(xr, y)],
            self.data[g.idx(xl, y)],
            self.data[g.idx(x, yu)],
            self.data[g.idx(x, yd)],
        ]
    }

    /// Arithmetic mean spin vector over all sites.
    pub fn mean(&self) -> [f64; 3] {
        let sum = self.magnetization();
        let inv = 1.0 / self.grid.n_sites() as f64;
        [sum[0] * inv, sum[1] * inv, sum[2] * inv]
    }

    /// Net magnetization: component-wise sum over all sites.
    pub fn magnetization(&self) -> [f64; 3] {
        let mut sum = [0.0; 3];
        for s in &self.data {
            sum[0] += s[0];
            sum[1] += s[1];
            sum[2] += s[2];
        }
        sum
    }
}

/// Draw a single isotropic unit vector (Marsaglia rejection method).
pub fn random_unit_spin<R: Rng + ?Sized>(rng: &mut R) -> [f64; 3] {
    loop {
        let v = [
            rng.gen::<f64>() * 2.0 - 1.0,
            rng.gen::<f64>() * 2.0 - 1.0,
            rng.gen::<f64>() * 2.0 - 1.0,
        ];
        let n2 = dot(v, v);
        // Reject points outside the ball (cube corners would bias the
        // direction) and points too close to the origin to normalise stably.
        if n2 <= 1.0 && n2 > 1e-12 {
            let inv = 1.0 / n2.sqrt();
            return [v[0] * inv, v[1] * inv, v[2] * inv];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::norm;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn construction_defaults_to_plus_z() {
        let s = SpinField::new(3, 2).unwrap();
        assert_eq!(s.grid.n_sites(), 6);
        for v in &s.data {
            assert_eq!(*v, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn construction_normalises_fill_value() {
        let s = SpinField::with_value(2, 2, [0.0, 3.0, 4.0]).unwrap();
        let v = s.get(1, 1);
        assert!((norm(v) - 1.0).abs() < 1e-12);
        assert!((v[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            SpinField::new(0, 4).unwrap_err(),
            FieldError::Shape { nx: 0, ny: 4 }
        );
        assert_eq!(
            SpinField::new(4, 0).unwrap_err(),
            FieldError::Shape { nx: 4, ny: 0 }
        );
    }

    #[test]
    fn degenerate_fill_value_is_rejected() {
        assert!(matches!(
            SpinField::with_value(2, 2, [0.0, 0.0, 0.0]),
            Err(FieldError::DegenerateSpin { .. })
        ));
    }

    #[test]
    fn randomise_keeps_unit_norms() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let mut s = SpinField::new(8, 8).unwrap();
        s.randomise(&mut rng);
        for v in &s.data {
            assert!((norm(*v) - 1.0).abs() < 1e-9);
        }
        // Not all spins should be identical after randomisation.
        assert!(s.data.iter().any(|v| *v != s.data[0]));
    }

    #[test]
    fn normalise_reports_degenerate_site() {
        let mut s = SpinField::new(3, 3).unwrap();
        s.set(2, 1, [0.0, 0.0, 0.0]);
        assert_eq!(
            s.normalise().unwrap_err(),
            FieldError::DegenerateSpin { x: 2, y: 1 }
        );
        // Field untouched on failure: other sites keep their values.
        assert_eq!(s.get(0, 0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn normalise_rescales_in_place() {
        let mut s = SpinField::new(2, 2).unwrap();
        s.set(0, 1, [2.0, 0.0, 0.0]);
        s.normalise().unwrap();
        assert_eq!(s.get(0, 1), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn neighbors_wrap_at_the_boundary() {
        let mut s = SpinField::new(3, 2).unwrap();
        s.set(1, 0, [1.0, 0.0, 0.0]); // +x of (0,0)
        s.set(2, 0, [-1.0, 0.0, 0.0]); // -x of (0,0) via wrap
        s.set(0, 1, [0.0, 1.0, 0.0]); // +y and -y of (0,0) via wrap (ny=2)
        let [xp, xm, yp, ym] = s.neighbors(0, 0);
        assert_eq!(xp, [1.0, 0.0, 0.0]);
        assert_eq!(xm, [-1.0, 0.0, 0.0]);
        assert_eq!(yp, [0.0, 1.0, 0.0]);
        assert_eq!(ym, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn mean_and_magnetization_of_uniform_field() {
        let s = SpinField::new(4, 5).unwrap();
        assert_eq!(s.mean(), [0.0, 0.0, 1.0]);
        assert_eq!(s.magnetization(), [0.0, 0.0, 20.0]);
    }
}
