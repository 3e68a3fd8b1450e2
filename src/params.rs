// src/params.rs

/// Physical parameters of the spin Hamiltonian (dimensionless units).
///
/// Fixed for the duration of a relaxation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemParams {
    /// External field B (Zeeman term), 3-vector.
    pub b_ext: [f64; 3],
    /// Uniaxial anisotropy constant K (>= 0 favours the easy axis).
    pub k_u: f64,
    /// Anisotropy easy axis u. Expected unit-norm; used as supplied.
    pub easy_axis: [f64; 3],
    /// Exchange coupling J (> 0 ferromagnetic, < 0 antiferromagnetic).
    pub j_ex: f64,
    /// Dzyaloshinskii–Moriya constant D (interfacial form).
    pub dmi: f64,
}

impl SystemParams {
    /// Zeeman-only parameter set, all couplings off.
    pub fn zeeman_only(b_ext: [f64; 3]) -> Self {
        Self {
            b_ext,
            k_u: 0.0,
            easy_axis: [0.0, 0.0, 1.0],
            j_ex: 0.0,
            dmi: 0.0,
        }
    }
}

impl Default for SystemParams {
    fn default() -> Self {
        Self::zeeman_only([0.0, 0.0, 0.0])
    }
}
