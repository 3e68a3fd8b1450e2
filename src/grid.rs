// src/grid.rs

/// Rectangular lattice geometry with periodic (toroidal) boundary conditions.
///
/// Sites are addressed by `(x, y)` with `0 <= x < nx`, `0 <= y < ny`, stored
/// row-major (`y` is the slow index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
}

impl Grid2D {
    pub fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Total number of lattice sites.
    pub fn n_sites(&self) -> usize {
        self.nx * self.ny
    }

    /// Convert (x, y) indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny);
        y * self.nx + x
    }

    /// Site displaced from (x, y) by (dx, dy) lattice steps, wrapping
    /// periodically in both directions.
    #[inline]
    pub fn shift(&self, x: usize, y: usize, dx: isize, dy: isize) -> (usize, usize) {
        let sx = (x as isize + dx).rem_euclid(self.nx as isize) as usize;
        let sy = (y as isize + dy).rem_euclid(self.ny as isize) as usize;
        (sx, sy)
    }
}
