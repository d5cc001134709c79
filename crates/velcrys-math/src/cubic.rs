// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Closed-Form Cubic Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Cardano solution of the monic cubic λ³ + Bλ² + Cλ + D = 0.
//!
//! ```text
//!   P = BC/6 − B³/27 − D/2,   Q = (3C − B²)/9
//!   u = ∛(P ± √(P² + Q³))     (sign with the larger modulus)
//!   v = −Q/u
//!   λ_k = −B/3 + uωᵏ + vω⁻ᵏ,  ω = (−1 + i√3)/2
//! ```
//!
//! Arithmetic is complex throughout so the three-real-root case (negative
//! discriminant) needs no separate trigonometric branch. With the principal
//! cube root, λ₁ is the largest root whenever all three are real.

use num_complex::Complex64;

/// Below this modulus the cube root is treated as zero and v = 0.
const CUBE_ROOT_FLOOR: f64 = 1e-15;

/// Primitive cube root of unity ω = (−1 + i√3)/2.
#[inline]
fn omega() -> Complex64 {
    Complex64::new(-0.5, 0.75_f64.sqrt())
}

/// Cardano invariants (P, Q) of λ³ + bλ² + cλ + d.
///
/// P² + Q³ is −1/108 of the discriminant: zero for a repeated root, and
/// P = Q = 0 for a triple root.
#[inline]
pub fn cardano_invariants(b: f64, c: f64, d: f64) -> (f64, f64) {
    let p = b * c / 6.0 - b * b * b / 27.0 - 0.5 * d;
    let q = (3.0 * c - b * b) / 9.0;
    (p, q)
}

/// Three roots of λ³ + bλ² + cλ + d in solver order (largest real root first).
pub fn solve_monic_cubic(b: f64, c: f64, d: f64) -> [Complex64; 3] {
    let (p, q) = cardano_invariants(b, c, d);

    let s = Complex64::new(p * p + q * q * q, 0.0).sqrt();
    let p = Complex64::new(p, 0.0);
    let mut u = p + s;
    let alt = p - s;
    if alt.norm() > u.norm() {
        u = alt;
    }
    let u = u.cbrt();
    let v = if u.norm() > CUBE_ROOT_FLOOR {
        -q / u
    } else {
        Complex64::new(0.0, 0.0)
    };

    let w = omega();
    let w2 = w * w;
    let shift = Complex64::new(-b / 3.0, 0.0);
    [shift + u + v, shift + u * w + v * w2, shift + u * w2 + v * w]
}

/// λ³ + bλ² + cλ + d evaluated at `root`.
pub fn cubic_residual(b: f64, c: f64, d: f64, root: Complex64) -> Complex64 {
    ((root + b) * root + c) * root + d
}

/// Coefficients (b, c, d) of the monic cubic with the given roots.
pub fn monic_from_roots(r: [f64; 3]) -> (f64, f64, f64) {
    let b = -(r[0] + r[1] + r[2]);
    let c = r[0] * r[1] + r[0] * r[2] + r[1] * r[2];
    let d = -r[0] * r[1] * r[2];
    (b, c, d)
}
