// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Property-Based Tests (proptest) for velcrys-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for velcrys-math using proptest.
//!
//! Covers: cubic residuals and root recovery, root ordering, Nelder-Mead
//! convergence on convex quadratics.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use velcrys_math::cubic::{cubic_residual, monic_from_roots, solve_monic_cubic};
use velcrys_math::nelder_mead::{minimize, NelderMeadConfig};

// ── Cubic Solver Properties ──────────────────────────────────────────

proptest! {
    /// Every returned root satisfies the cubic for arbitrary real roots.
    #[test]
    fn cubic_roots_have_small_residual(
        r1 in -10.0f64..10.0,
        r2 in -10.0f64..10.0,
        r3 in -10.0f64..10.0,
    ) {
        let (b, c, d) = monic_from_roots([r1, r2, r3]);
        for root in solve_monic_cubic(b, c, d) {
            let res = cubic_residual(b, c, d, root).norm();
            prop_assert!(res < 1e-6, "residual {} at root {}", res, root);
        }
    }

    /// Well-separated real roots are recovered, largest first.
    #[test]
    fn cubic_recovers_separated_roots(
        r1 in 0.0f64..5.0,
        g1 in 0.5f64..5.0,
        g2 in 0.5f64..5.0,
    ) {
        let roots_in = [r1, r1 + g1, r1 + g1 + g2];
        let (b, c, d) = monic_from_roots(roots_in);
        let roots = solve_monic_cubic(b, c, d);

        prop_assert!((roots[0].re - roots_in[2]).abs() < 1e-8,
            "largest root {} vs {}", roots[0].re, roots_in[2]);
        let mut re: Vec<f64> = roots.iter().map(|r| r.re).collect();
        re.sort_by(|a, b| a.total_cmp(b));
        for (got, want) in re.iter().zip(roots_in.iter()) {
            prop_assert!((got - want).abs() < 1e-8, "root {} vs {}", got, want);
        }
        for r in roots {
            prop_assert!(r.im.abs() < 1e-8, "spurious imaginary part {}", r.im);
        }
    }

    /// Root sum and product reproduce −B and −D (Vieta).
    #[test]
    fn cubic_vieta_relations(
        b in -50.0f64..50.0,
        c in -50.0f64..50.0,
        d in -50.0f64..50.0,
    ) {
        let roots = solve_monic_cubic(b, c, d);
        let sum = roots[0] + roots[1] + roots[2];
        let prod = roots[0] * roots[1] * roots[2];
        prop_assert!((sum.re + b).abs() < 1e-6 * (1.0 + b.abs()));
        prop_assert!(sum.im.abs() < 1e-6);
        prop_assert!((prod.re + d).abs() < 1e-6 * (1.0 + d.abs() + c.abs() + b.abs() * b.abs()));
    }
}

/// Fixed-seed batch of physical-scale cubics (squared velocities ~ 1e5–1e8 m²/s²).
#[test]
fn cubic_randomized_physical_scale() {
    let mut rng = StdRng::seed_from_u64(2026);
    for _ in 0..50 {
        let roots_in = [
            rng.gen_range(1.0e5..5.0e7),
            rng.gen_range(1.0e5..5.0e7),
            rng.gen_range(1.0e5..5.0e7),
        ];
        let (b, c, d) = monic_from_roots(roots_in);
        let scale = roots_in.iter().fold(0.0_f64, |a, r| a.max(r.abs()));
        for root in solve_monic_cubic(b, c, d) {
            let res = cubic_residual(b, c, d, root).norm();
            assert_relative_residual(res, scale);
        }
    }
}

/// Residual relative to the size of the cubic's terms.
fn assert_relative_residual(res: f64, scale: f64) {
    assert!(
        res / scale.powi(3) < 1e-6,
        "relative residual {} too large",
        res / scale.powi(3)
    );
}

// ── Nelder-Mead Properties ───────────────────────────────────────────

proptest! {
    /// Separable convex quadratics are minimized to their centre.
    #[test]
    fn nelder_mead_finds_quadratic_minimum(
        cx in -2.0f64..2.0,
        cy in -2.0f64..2.0,
        wx in 0.5f64..5.0,
        wy in 0.5f64..5.0,
    ) {
        let f = |x: &[f64]| wx * (x[0] - cx).powi(2) + wy * (x[1] - cy).powi(2);
        let cfg = NelderMeadConfig {
            f_tol: 1e-12,
            max_iterations: 2000,
            max_evaluations: 4000,
            ..Default::default()
        };
        let res = minimize(f, &[0.2, 0.3], &cfg);
        prop_assert!(res.converged);
        prop_assert!((res.x[0] - cx).abs() < 1e-4, "x = {:?}, centre = ({}, {})", res.x, cx, cy);
        prop_assert!((res.x[1] - cy).abs() < 1e-4, "x = {:?}, centre = ({}, {})", res.x, cx, cy);
    }

    /// The returned value never exceeds the value at the seed.
    #[test]
    fn nelder_mead_never_worse_than_seed(
        x0 in -3.0f64..3.0,
        y0 in -3.0f64..3.0,
    ) {
        let f = |x: &[f64]| (x[0] * x[0] - 1.0).powi(2) + x[1].sin() + 0.1 * x[1] * x[1];
        let res = minimize(f, &[x0, y0], &NelderMeadConfig::default());
        prop_assert!(res.value <= f(&[x0, y0]));
        prop_assert!(res.evaluations <= NelderMeadConfig::default().max_evaluations + 4);
    }
}
