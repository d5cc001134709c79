// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Cubic Class I Magnet
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Cubic anisotropy F = K1(αx²αy² + αx²αz² + αy²αz²) + K2 αx²αy²αz² and the
//! Rinaldi–Turilli magnetoelastic stiffness corrections for constants b1, b2.

use super::{Mat3, MagneticSymmetry, Vec3};
use velcrys_types::constants::PA_TO_GPA;
use velcrys_types::state::{MagneticState, SusceptibilityTensor};
use velcrys_types::voigt::VoigtMatrix;

/// Cubic class I crystal; magnetoelastic constants in Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicI {
    pub b1: f64,
    pub b2: f64,
}

/// Indices of the two other axes.
const OTHERS: [(usize, usize); 3] = [(1, 2), (0, 2), (0, 1)];

impl MagneticSymmetry for CubicI {
    fn name(&self) -> &'static str {
        "cubic_i"
    }

    fn is_uncoupled(&self) -> bool {
        self.b1 == 0.0 && self.b2 == 0.0
    }

    fn anisotropy_energy(&self, state: &MagneticState, a: Vec3) -> f64 {
        let (x2, y2, z2) = (a[0] * a[0], a[1] * a[1], a[2] * a[2]);
        state.k1 * (x2 * y2 + x2 * z2 + y2 * z2) + state.k2 * x2 * y2 * z2
    }

    fn anisotropy_gradient(&self, state: &MagneticState, a: Vec3) -> Vec3 {
        let mut g = [0.0; 3];
        for (i, &(j, k)) in OTHERS.iter().enumerate() {
            let (aj2, ak2) = (a[j] * a[j], a[k] * a[k]);
            g[i] = 2.0 * a[i] * (state.k1 * (aj2 + ak2) + state.k2 * aj2 * ak2);
        }
        g
    }

    fn anisotropy_hessian(&self, state: &MagneticState, a: Vec3) -> Mat3 {
        let mut h = [[0.0; 3]; 3];
        for (i, &(j, k)) in OTHERS.iter().enumerate() {
            let (aj2, ak2) = (a[j] * a[j], a[k] * a[k]);
            h[i][i] = 2.0 * (state.k1 * (aj2 + ak2) + state.k2 * aj2 * ak2);
        }
        for (k, &(i, j)) in OTHERS.iter().enumerate() {
            let ak2 = a[k] * a[k];
            let hij = 4.0 * a[i] * a[j] * (state.k1 + state.k2 * ak2);
            h[i][j] = hij;
            h[j][i] = hij;
        }
        h
    }

    fn magnetoelastic_correction(
        &self,
        chi: &SusceptibilityTensor,
        alpha: Vec3,
        ms: f64,
    ) -> VoigtMatrix {
        let [ax, ay, az] = alpha;
        let (b1, b2) = (self.b1, self.b2);
        let r1 = (b1 / ms) * (b1 / ms);
        let r2 = (b2 / ms) * (b2 / ms);
        let k = 2.0 * b1 * b2 / (ms * ms);
        let SusceptibilityTensor {
            xx,
            yy,
            zz,
            xy,
            xz,
            yz,
        } = *chi;

        let mut dc = VoigtMatrix::zeros();
        dc.set(1, 1, -r1 * 4.0 * xx * ax * ax);
        dc.set(2, 2, -r1 * 4.0 * yy * ay * ay);
        dc.set(3, 3, -r1 * 4.0 * zz * az * az);
        dc.set(1, 2, -r1 * 4.0 * xy * ax * ay);
        dc.set(1, 3, -r1 * 4.0 * xz * ax * az);
        dc.set(2, 3, -r1 * 4.0 * yz * ay * az);

        dc.set(4, 4, -r2 * (zz * ay * ay + 2.0 * yz * ay * az + yy * az * az));
        dc.set(5, 5, -r2 * (xx * az * az + zz * ax * ax + 2.0 * xz * ax * az));
        dc.set(6, 6, -r2 * (xx * ay * ay + yy * ax * ax + 2.0 * xy * ax * ay));
        dc.set(4, 5, -r2 * (xy * az * az + xz * ay * az + yz * ax * az + zz * ax * ay));
        dc.set(4, 6, -r2 * (xy * ay * az + xz * ay * ay + yy * ax * az + yz * ax * ay));
        dc.set(5, 6, -r2 * (xx * ay * az + xy * ax * az + xz * ax * ay + yz * ax * ax));

        dc.set(1, 4, -k * (xy * ax * az + xz * ax * ay));
        dc.set(1, 5, -k * (xx * ax * az + xz * ax * ax));
        dc.set(1, 6, -k * (xx * ax * ay + xy * ax * ax));
        dc.set(2, 4, -k * (yy * ay * az + yz * ay * ay));
        dc.set(2, 5, -k * (xy * ay * az + yz * ax * ay));
        dc.set(2, 6, -k * (xy * ay * ay + yy * ax * ay));
        dc.set(3, 4, -k * (yz * az * az + zz * az * ay));
        dc.set(3, 5, -k * (xz * az * az + zz * ax * az));
        dc.set(3, 6, -k * (xz * ay * az + yz * ax * az));

        dc.scaled(PA_TO_GPA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(k1: f64, k2: f64) -> MagneticState {
        MagneticState {
            ms: 8.0e5,
            k1,
            k2,
            field: [0.0; 3],
        }
    }

    #[test]
    fn test_energy_along_axes_and_diagonal() {
        let sym = CubicI { b1: 0.0, b2: 0.0 };
        let st = state(1.0e4, 3.0e3);
        assert_eq!(sym.anisotropy_energy(&st, [0.0, 0.0, 1.0]), 0.0);
        let d = 1.0 / 3.0_f64.sqrt();
        let e111 = sym.anisotropy_energy(&st, [d, d, d]);
        assert!((e111 - (1.0e4 / 3.0 + 3.0e3 / 27.0)).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_and_hessian_match_finite_difference() {
        let sym = CubicI { b1: 0.0, b2: 0.0 };
        let st = state(2.0e4, -7.0e3);
        let a = [0.3, -0.5, 0.7];
        let g = sym.anisotropy_gradient(&st, a);
        let h = sym.anisotropy_hessian(&st, a);
        let eps = 1e-6;
        for i in 0..3 {
            let mut p = a;
            let mut m = a;
            p[i] += eps;
            m[i] -= eps;
            let fd = (sym.anisotropy_energy(&st, p) - sym.anisotropy_energy(&st, m)) / (2.0 * eps);
            assert!((g[i] - fd).abs() < 1e-4, "g[{i}] {} vs {fd}", g[i]);
            let gp = sym.anisotropy_gradient(&st, p);
            let gm = sym.anisotropy_gradient(&st, m);
            for j in 0..3 {
                let fd = (gp[j] - gm[j]) / (2.0 * eps);
                assert!((h[i][j] - fd).abs() < 1e-3, "h[{i}][{j}] {} vs {fd}", h[i][j]);
            }
        }
    }

    #[test]
    fn test_correction_along_z() {
        // α = ẑ: only terms carrying az survive.
        let sym = CubicI {
            b1: 5.0e6,
            b2: -8.0e6,
        };
        let chi = SusceptibilityTensor {
            xx: 1.0e6,
            yy: 1.0e6,
            zz: 0.0,
            xy: 0.0,
            xz: 0.0,
            yz: 0.0,
        };
        let ms = 8.0e5;
        let dc = sym.magnetoelastic_correction(&chi, [0.0, 0.0, 1.0], ms);
        let r2 = (8.0e6 / ms) * (8.0e6 / ms);
        assert!((dc.get(4, 4) - (-r2 * 1.0e6 * 1e-9)).abs() < 1e-12);
        assert!((dc.get(5, 5) - (-r2 * 1.0e6 * 1e-9)).abs() < 1e-12);
        assert_eq!(dc.get(1, 1), 0.0);
        assert_eq!(dc.get(3, 3), 0.0);
        assert_eq!(dc.get(6, 6), 0.0);
    }

    #[test]
    fn test_zero_constants_give_zero_correction() {
        let sym = CubicI { b1: 0.0, b2: 0.0 };
        let chi = SusceptibilityTensor {
            xx: 3.0,
            yy: 2.0,
            zz: 1.0,
            xy: 0.5,
            xz: -0.2,
            yz: 0.1,
        };
        let dc = sym.magnetoelastic_correction(&chi, [0.6, 0.0, 0.8], 8.0e5);
        assert_eq!(dc.max_abs(), 0.0);
    }
}
