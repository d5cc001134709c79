// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Hexagonal Class I Magnet
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Uniaxial anisotropy F = K1 sin²θ + K2 sin⁴θ about the c axis (z) and the
//! hexagonal magnetoelastic corrections for constants b21, b22, b3, b4.

use super::{Mat3, MagneticSymmetry, Vec3};
use velcrys_types::constants::PA_TO_GPA;
use velcrys_types::state::{MagneticState, SusceptibilityTensor};
use velcrys_types::voigt::VoigtMatrix;

/// Hexagonal class I crystal; magnetoelastic constants in Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexagonalI {
    pub b21: f64,
    pub b22: f64,
    pub b3: f64,
    pub b4: f64,
}

impl MagneticSymmetry for HexagonalI {
    fn name(&self) -> &'static str {
        "hexagonal_i"
    }

    fn is_uncoupled(&self) -> bool {
        [self.b21, self.b22, self.b3, self.b4].iter().all(|b| *b == 0.0)
    }

    // Written in αz alone: sin²θ = 1 − αz².
    fn anisotropy_energy(&self, state: &MagneticState, a: Vec3) -> f64 {
        let s = 1.0 - a[2] * a[2];
        state.k1 * s + state.k2 * s * s
    }

    fn anisotropy_gradient(&self, state: &MagneticState, a: Vec3) -> Vec3 {
        let z = a[2];
        let s = 1.0 - z * z;
        [0.0, 0.0, -2.0 * z * (state.k1 + 2.0 * state.k2 * s)]
    }

    fn anisotropy_hessian(&self, state: &MagneticState, a: Vec3) -> Mat3 {
        let z = a[2];
        let s = 1.0 - z * z;
        let mut h = [[0.0; 3]; 3];
        h[2][2] = -2.0 * state.k1 - 4.0 * state.k2 * s + 8.0 * state.k2 * z * z;
        h
    }

    fn magnetoelastic_correction(
        &self,
        chi: &SusceptibilityTensor,
        alpha: Vec3,
        ms: f64,
    ) -> VoigtMatrix {
        let [ax, ay, az] = alpha;
        let Self { b21, b22, b3, b4 } = *self;
        let SusceptibilityTensor {
            xx,
            yy,
            zz,
            xy,
            xz,
            yz,
        } = *chi;
        let inv = 1.0 / (ms * ms);

        // Basal-plane combination shared by C11, C22 and C12.
        let basal = xx * ax * ax + yy * ay * ay - xy * ax * ay;
        let mixed = 2.0 * b21 * b3 * az * (yz * ay - xz * ax);
        let axial = 4.0 * b21 * b21 * az * az * zz;

        let mut dc = VoigtMatrix::zeros();
        dc.set(1, 1, inv * (-b3 * b3 * basal + mixed - axial));
        dc.set(2, 2, inv * (-b3 * b3 * basal - mixed - axial));
        dc.set(1, 2, inv * (b3 * b3 * basal - axial));
        dc.set(3, 3, -inv * b22 * b22 * 4.0 * zz * az * az);
        dc.set(4, 4, -inv * b4 * b4 * (zz * ay * ay + yz * ay * az + yy * az * az));
        dc.set(5, 5, -inv * b4 * b4 * (xx * az * az + zz * ax * ax + xz * ax * az));
        dc.set(6, 6, -inv * b3 * b3 * (xx * ay * ay + yy * ax * ax + xy * ax * ay));

        dc.set(
            1,
            3,
            inv * (-b22 * b3 * (xz * ax * az - yz * ay * az) - 4.0 * zz * b21 * b22 * az * az),
        );
        dc.set(
            2,
            3,
            inv * (b3 * b22 * az * (ax * xz - ay * yz) - 4.0 * b21 * b22 * az * az * zz),
        );

        let shear_y = b21 * (4.0 * zz * ay * az + 2.0 * yz * az * az);
        let shear_x = b21 * (4.0 * zz * ax * az + 2.0 * xz * az * az);
        dc.set(
            1,
            4,
            -inv * 0.5 * b4
                * (b3 * (-2.0 * yy * ay * az + xy * ax * az + xz * ax * ay - yz * ay * ay)
                    + shear_y),
        );
        dc.set(
            1,
            5,
            -inv * 0.5 * b4
                * (b3 * (2.0 * xx * ax * az - xy * ay * az - yz * ax * ay + xz * ax * ax)
                    + shear_x),
        );
        dc.set(
            1,
            6,
            -inv * 0.5 * b3
                * (2.0 * b3 * ax * ay * (xx - yy)
                    + b3 * xy * (ax * ax - ay * ay)
                    + 2.0 * b21 * az * (ay * xz + ax * yz)),
        );
        dc.set(
            2,
            4,
            -inv * 0.5 * b4
                * (b3 * (2.0 * yy * ay * az - xy * ax * az - xz * ax * ay + yz * ay * ay)
                    + shear_y),
        );
        dc.set(
            2,
            5,
            -inv * 0.5 * b4
                * (b3 * (-2.0 * xx * ax * az + xy * ay * az - xz * ax * ax + yz * ax * ay)
                    + shear_x),
        );
        dc.set(
            2,
            6,
            -inv * 0.5 * b4
                * (b3 * (-2.0 * xx * ay * ax + 2.0 * yy * ax * ay + xy * ay * ay - xy * ax * ax)
                    + b21 * (2.0 * xz * ay * az + 2.0 * yz * az * ax)),
        );

        dc.set(3, 4, -inv * b22 * b4 * az * (2.0 * zz * ay + az * yz));
        dc.set(3, 5, -inv * b22 * b4 * az * (2.0 * zz * ax + az * xz));
        dc.set(3, 6, -inv * b22 * b3 * az * (xz * ay + ax * yz));

        dc.set(
            4,
            5,
            -0.5 * inv * b4 * b4 * (xy * az * az + xz * ay * az + yz * ax * az + 2.0 * zz * ax * ay),
        );
        dc.set(
            4,
            6,
            -0.5 * inv * b3 * b4 * (xy * ay * az + xz * ay * ay + 2.0 * yy * ax * az + yz * ax * ay),
        );
        dc.set(
            5,
            6,
            -0.5 * inv * b3 * b4 * (2.0 * xx * ay * az + xy * ax * az + xz * ax * ay + yz * ax * ax),
        );

        dc.scaled(PA_TO_GPA)
    }
}
