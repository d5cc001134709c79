// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Voigt Stiffness
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Symmetric 6×6 Voigt matrices and the density-normalized stiffness model.
//!
//! Voigt indices are 1-based in the public accessors (`get(1, 1)` is C11),
//! matching crystallographic notation. The 21 independent entries are
//! ordered row-wise over the upper triangle: 11, 12, …, 16, 22, …, 26, 33,
//! …, 66.

use crate::constants::GPA_TO_PA;
use crate::error::{VelcrysError, VelcrysResult};
use std::ops::Add;

/// Number of independent entries of a symmetric 6×6 matrix.
pub const VOIGT_INDEPENDENT: usize = 21;

/// 1-based (i, j) pairs of the upper triangle in storage order.
pub const VOIGT_UPPER: [(usize, usize); VOIGT_INDEPENDENT] = [
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (1, 6),
    (2, 2),
    (2, 3),
    (2, 4),
    (2, 5),
    (2, 6),
    (3, 3),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 4),
    (4, 5),
    (4, 6),
    (5, 5),
    (5, 6),
    (6, 6),
];

/// Symmetric 6×6 matrix in Voigt notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoigtMatrix {
    m: [[f64; 6]; 6],
}

impl Default for VoigtMatrix {
    fn default() -> Self {
        Self::zeros()
    }
}

impl VoigtMatrix {
    pub fn zeros() -> Self {
        VoigtMatrix { m: [[0.0; 6]; 6] }
    }

    /// Build from the 21 upper-triangle entries, mirrored to the lower triangle.
    pub fn from_upper(upper: [f64; VOIGT_INDEPENDENT]) -> Self {
        let mut out = Self::zeros();
        for (&(i, j), &value) in VOIGT_UPPER.iter().zip(upper.iter()) {
            out.set(i, j, value);
        }
        out
    }

    /// Cubic crystal: C22 = C33 = C11, C13 = C23 = C12, C55 = C66 = C44.
    pub fn cubic(c11: f64, c12: f64, c44: f64) -> Self {
        let mut out = Self::zeros();
        for i in 1..=3 {
            out.set(i, i, c11);
            out.set(i + 3, i + 3, c44);
        }
        out.set(1, 2, c12);
        out.set(1, 3, c12);
        out.set(2, 3, c12);
        out
    }

    /// Hexagonal crystal with the c axis along z.
    /// C22 = C11, C23 = C13, C55 = C44, C66 = (C11 − C12)/2.
    pub fn hexagonal(c11: f64, c12: f64, c13: f64, c33: f64, c44: f64) -> Self {
        let mut out = Self::zeros();
        out.set(1, 1, c11);
        out.set(2, 2, c11);
        out.set(3, 3, c33);
        out.set(1, 2, c12);
        out.set(1, 3, c13);
        out.set(2, 3, c13);
        out.set(4, 4, c44);
        out.set(5, 5, c44);
        out.set(6, 6, 0.5 * (c11 - c12));
        out
    }

    /// Entry C_ij, 1-based. Panics outside 1..=6.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.m[i - 1][j - 1]
    }

    /// Set C_ij and C_ji, 1-based.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.m[i - 1][j - 1] = value;
        self.m[j - 1][i - 1] = value;
    }

    /// Entry at 0-based Voigt indices.
    #[inline]
    pub fn entry(&self, p: usize, q: usize) -> f64 {
        self.m[p][q]
    }

    pub fn upper(&self) -> [f64; VOIGT_INDEPENDENT] {
        let mut out = [0.0; VOIGT_INDEPENDENT];
        for (slot, &(i, j)) in out.iter_mut().zip(VOIGT_UPPER.iter()) {
            *slot = self.get(i, j);
        }
        out
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for row in out.m.iter_mut() {
            for v in row.iter_mut() {
                *v *= factor;
            }
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    pub fn max_abs(&self) -> f64 {
        self.m.iter().flatten().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }
}

impl Add for VoigtMatrix {
    type Output = VoigtMatrix;

    fn add(self, rhs: VoigtMatrix) -> VoigtMatrix {
        let mut out = self;
        for p in 0..6 {
            for q in 0..6 {
                out.m[p][q] += rhs.m[p][q];
            }
        }
        out
    }
}

/// Density-normalized stiffness a_ij = C_ij·10⁹/ρ (m²/s²).
///
/// Positive definiteness is not checked; a non-physical tensor produces
/// complex phase velocities downstream rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StiffnessModel {
    a: VoigtMatrix,
}

impl StiffnessModel {
    /// Normalize a stiffness tensor given in GPa by the density in kg/m³.
    pub fn from_elastic(c_gpa: &VoigtMatrix, density: f64) -> VelcrysResult<Self> {
        if !density.is_finite() || density <= 0.0 {
            return Err(VelcrysError::PhysicsViolation(format!(
                "density must be finite and > 0 kg/m^3, got {density}"
            )));
        }
        if !c_gpa.is_finite() {
            return Err(VelcrysError::ConfigError(
                "stiffness tensor contains non-finite entries".to_string(),
            ));
        }
        Ok(StiffnessModel {
            a: c_gpa.scaled(GPA_TO_PA / density),
        })
    }

    /// Wrap an already normalized matrix.
    pub fn from_normalized(a: VoigtMatrix) -> Self {
        StiffnessModel { a }
    }

    /// a_ij, 1-based.
    #[inline]
    pub fn a(&self, i: usize, j: usize) -> f64 {
        self.a.get(i, j)
    }

    /// a at 0-based Voigt indices.
    #[inline]
    pub fn entry(&self, p: usize, q: usize) -> f64 {
        self.a.entry(p, q)
    }

    /// The 21 named coefficients a11, a12, …, a66.
    pub fn coefficients(&self) -> [f64; VOIGT_INDEPENDENT] {
        self.a.upper()
    }

    pub fn matrix(&self) -> &VoigtMatrix {
        &self.a
    }
}
