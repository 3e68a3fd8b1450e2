// src/energy.rs
//
// Energy model for the 2D rectangular spin lattice.
//
// Four contributions, each summed once over the lattice:
//
//   Zeeman       E_Z = -Σ_i B · s_i
//   Anisotropy   E_A = -K Σ_i (u · s_i)^2
//   Exchange     E_J = -J Σ_<ij> s_i · s_j
//   DMI          E_D =  D Σ_<ij> (ẑ × r̂_ij) · (s_i × s_j)
//
// Bond sums run once per unordered nearest-neighbour pair: every site owns
// its +x and +y bonds, with periodic wrap. For the interfacial DMI form,
// ẑ × x̂ = ŷ and ẑ × ŷ = -x̂, so an x-bond contributes D (s_i × s_j)_y and a
// y-bond contributes -D (s_i × s_j)_x.
//
// The anisotropy axis is used as supplied; normalising it is the caller's
// responsibility.

use crate::params::SystemParams;
use crate::spin_field::SpinField;
use crate::vec3::{cross, dot};

/// Bond direction on the rectangular lattice, named by the unit displacement
/// r̂_ij from site i to site j.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondAxis {
    X,
    Y,
}

/// Per-term energy totals for one field configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBreakdown {
    pub zeeman: f64,
    pub anisotropy: f64,
    pub exchange: f64,
    pub dmi: f64,
}

impl EnergyBreakdown {
    pub fn total(&self) -> f64 {
        self.zeeman + self.anisotropy + self.exchange + self.dmi
    }
}

/// Exchange + DMI energy of the single bond i -> j along `axis`.
///
/// Evaluates exactly the per-bond terms `compute_energy` accumulates, so the
/// per-site and total paths agree bond-for-bond.
#[inline]
fn bond_energy(si: [f64; 3], sj: [f64; 3], axis: BondAxis, params: &SystemParams) -> f64 {
    let e_ex = -params.j_ex * dot(si, sj);
    let c = cross(si, sj);
    let e_dmi = match axis {
        BondAxis::X => params.dmi * c[1],
        BondAxis::Y => -params.dmi * c[0],
    };
    e_ex + e_dmi
}

/// On-site (Zeeman + anisotropy) energy of a single spin.
#[inline]
fn onsite_energy(s: [f64; 3], params: &SystemParams) -> f64 {
    let sdotu = dot(s, params.easy_axis);
    -dot(params.b_ext, s) - params.k_u * sdotu * sdotu
}

/// Compute all four energy terms over the full lattice.
///
/// Deterministic for identical inputs; never mutates the field.
pub fn compute_energy(field: &SpinField, params: &SystemParams) -> EnergyBreakdown {
    let g = field.grid;

    let mut e_zee = 0.0;
    let mut e_ani = 0.0;
    let mut e_ex = 0.0;
    let mut e_dmi = 0.0;

    for y in 0..g.ny {
        for x in 0..g.nx {
            let s = field.data[g.idx(x, y)];

            e_zee -= dot(params.b_ext, s);
            let sdotu = dot(s, params.easy_axis);
            e_ani -= params.k_u * sdotu * sdotu;

            // Each site owns its +x and +y bonds (periodic wrap), so every
            // unordered pair is counted exactly once.
            let (xr, _) = g.shift(x, y, 1, 0);
            let sr = field.data[g.idx(xr, y)];
            e_ex -= params.j_ex * dot(s, sr);
            e_dmi += params.dmi * cross(s, sr)[1];

            let (_, yu) = g.shift(x, y, 0, 1);
            let su = field.data[g.idx(x, yu)];
            e_ex -= params.j_ex * dot(s, su);
            e_dmi -= params.dmi * cross(s, su)[0];
        }
    }

    EnergyBreakdown {
        zeeman: e_zee,
        anisotropy: e_ani,
        exchange: e_ex,
        dmi: e_dmi,
    }
}

/// Total energy of the field: sum of the four contributions.
pub fn total_energy(field: &SpinField, params: &SystemParams) -> f64 {
    compute_energy(field, params).total()
}

/// Energy slice touching site (x, y): its own Zeeman and anisotropy terms
/// plus the bonds to its periodic neighbours, each bond counted once.
///
/// Bond orientation matches the total-energy sweep (i -> j along +x / +y), so
/// for a field unmodified elsewhere this equals the corresponding slice of
/// `total_energy` exactly. On a 1-wide lattice the +x and -x bonds coincide
/// in a single self-bond, counted once here as in the total; being constant
/// for unit spins it never affects acceptance decisions.
pub fn site_energy(field: &SpinField, params: &SystemParams, x: usize, y: usize) -> f64 {
    let g = field.grid;
    let s = field.data[g.idx(x, y)];

    let mut e = onsite_energy(s, params);

    // Bond owned by this site: (x, y) -> (x+1, y).
    let (xr, _) = g.shift(x, y, 1, 0);
    e += bond_energy(s, field.data[g.idx(xr, y)], BondAxis::X, params);

    // Bond owned by the left neighbour: (x-1, y) -> (x, y). Same bond as
    // above when nx == 1.
    if g.nx != 1 {
        let (xl, _) = g.shift(x, y, -1, 0);
        e += bond_energy(field.data[g.idx(xl, y)], s, BondAxis::X, params);
    }

    let (_, yu) = g.shift(x, y, 0, 1);
    e += bond_energy(s, field.data[g.idx(x, yu)], BondAxis::Y, params);

    if g.ny != 1 {
        let (_, yd) = g.shift(x, y, 0, -1);
        e += bond_energy(field.data[g.idx(x, yd)], s, BondAxis::Y, params);
    }

    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SystemParams;
    use crate::spin_field::SpinField;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn zeeman_energy_of_aligned_field() {
        // 2x2 all-up field in B = +z: four sites, each contributing -1.
        let field = SpinField::new(2, 2).unwrap();
        let params = SystemParams::zeeman_only([0.0, 0.0, 1.0]);
        let e = compute_energy(&field, &params);
        assert_relative_eq!(e.zeeman, -4.0);
        assert_eq!(e.anisotropy, 0.0);
        assert_eq!(e.exchange, 0.0);
        assert_eq!(e.dmi, 0.0);
        assert_relative_eq!(total_energy(&field, &params), -4.0);
    }

    #[test]
    fn anisotropy_favours_the_easy_axis() {
        let params = SystemParams {
            b_ext: [0.0; 3],
            k_u: 2.0,
            easy_axis: [0.0, 0.0, 1.0],
            j_ex: 0.0,
            dmi: 0.0,
        };
        let along = SpinField::new(3, 3).unwrap();
        let transverse = SpinField::with_value(3, 3, [1.0, 0.0, 0.0]).unwrap();
        // Along u: -K per site. Transverse: zero.
        assert_relative_eq!(total_energy(&along, &params), -18.0);
        assert_relative_eq!(total_energy(&transverse, &params), 0.0);
        // Alignment with -u is equally favourable ((u·s)^2 is even).
        let anti = SpinField::with_value(3, 3, [0.0, 0.0, -1.0]).unwrap();
        assert_relative_eq!(total_energy(&anti, &params), -18.0);
    }

    #[test]
    fn exchange_counts_each_periodic_bond_once() {
        // 3x2 uniform field: 2 bonds per site (+x, +y) * 6 sites = 12 bonds,
        // each contributing -J for aligned unit spins.
        let field = SpinField::new(3, 2).unwrap();
        let params = SystemParams {
            j_ex: 1.5,
            ..SystemParams::default()
        };
        assert_relative_eq!(total_energy(&field, &params), -1.5 * 12.0);
    }

    #[test]
    fn exchange_sign_flips_for_antialigned_neighbours() {
        // Two anti-parallel spins on a 2x1 ring: the two x-bonds each cost
        // +J; the two y self-bonds each contribute the constant -J.
        let mut field = SpinField::new(2, 1).unwrap();
        field.set(1, 0, [0.0, 0.0, -1.0]);
        let params = SystemParams {
            j_ex: 1.0,
            ..SystemParams::default()
        };
        let e = compute_energy(&field, &params);
        assert_relative_eq!(e.exchange, 2.0 - 2.0);
    }

    #[test]
    fn dmi_vanishes_for_uniform_field() {
        let params = SystemParams {
            dmi: 1.0,
            ..SystemParams::default()
        };
        let uniform = SpinField::new(4, 4).unwrap();
        assert_relative_eq!(total_energy(&uniform, &params), 0.0);
    }

    #[test]
    fn dmi_follows_bond_chirality() {
        // 3x1 ring: s = (+z, +x, -z).
        // Bond 0->1: (ẑ×x̂)·(ẑ×x̂)... componentwise: (s0×s1)_y = +1.
        // Bond 1->2: (x̂×(-ẑ))_y = +1. Bond 2->0: (-ẑ)×ẑ = 0.
        // y self-bonds carry no DMI (s×s = 0). Total: D * 2.
        let mut field = SpinField::new(3, 1).unwrap();
        field.set(1, 0, [1.0, 0.0, 0.0]);
        field.set(2, 0, [0.0, 0.0, -1.0]);
        let params = SystemParams {
            dmi: 1.0,
            ..SystemParams::default()
        };
        let e = compute_energy(&field, &params);
        assert_relative_eq!(e.dmi, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn site_energy_delta_matches_total_energy_delta() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(42);
        let mut field = SpinField::new(5, 4).unwrap();
        field.randomise(&mut rng);
        let params = SystemParams {
            b_ext: [0.1, -0.2, 0.3],
            k_u: 0.7,
            easy_axis: [0.0, 0.0, 1.0],
            j_ex: 1.0,
            dmi: 0.4,
        };

        let (x, y) = (2, 3);
        let e_total_before = total_energy(&field, &params);
        let e_site_before = site_energy(&field, &params, x, y);

        field.set(x, y, [0.0, 1.0, 0.0]);
        let e_total_after = total_energy(&field, &params);
        let e_site_after = site_energy(&field, &params, x, y);

        assert_relative_eq!(
            e_total_after - e_total_before,
            e_site_after - e_site_before,
            epsilon = 1e-12
        );
    }

    #[test]
    fn site_energies_sum_with_double_counted_bonds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut field = SpinField::new(6, 3).unwrap();
        field.randomise(&mut rng);
        let params = SystemParams {
            b_ext: [0.0, 0.0, 0.5],
            k_u: 0.3,
            easy_axis: [1.0, 0.0, 0.0],
            j_ex: -0.8,
            dmi: 0.2,
        };

        let e = compute_energy(&field, &params);
        let mut site_sum = 0.0;
        for y in 0..field.grid.ny {
            for x in 0..field.grid.nx {
                site_sum += site_energy(&field, &params, x, y);
            }
        }
        // Every bond touches two sites, so bond terms appear twice in the sum.
        let expected = e.zeeman + e.anisotropy + 2.0 * (e.exchange + e.dmi);
        assert_relative_eq!(site_sum, expected, epsilon = 1e-9);
    }
}
