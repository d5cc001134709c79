// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Property-Based Tests (proptest) for velcrys-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for velcrys-core using proptest.
//!
//! Covers: Christoffel symmetry, Euler identity v·n = pv, grid/standalone
//! agreement, uncoupled field runs, closed-form energy curvatures.

use proptest::prelude::*;
use velcrys_core::christoffel::{christoffel_entry, group_velocity, ChristoffelMatrix, WaveSolution};
use velcrys_core::grid::evaluate_velocity_surface;
use velcrys_core::magnetic::{CubicI, HexagonalI, MagneticSymmetry};
use velcrys_core::magnetoelastic::MagneticAnalysis;
use velcrys_types::state::{Branch, Direction, MagneticState};
use velcrys_types::voigt::{StiffnessModel, VoigtMatrix};

fn triclinic() -> StiffnessModel {
    let mut upper = [150.456; 21];
    upper[0] = 200.125;
    upper[6] = 200.125;
    StiffnessModel::from_elastic(&VoigtMatrix::from_upper(upper), 10000.429).unwrap()
}

fn central_second(f: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - 2.0 * f(x) + f(x - h)) / (h * h)
}

// ── Christoffel Properties ───────────────────────────────────────────

proptest! {
    /// Γ is symmetric for any symmetric stiffness and direction.
    #[test]
    fn christoffel_is_symmetric(
        upper in prop::array::uniform21(-5.0f64..5.0),
        theta in 0.0f64..std::f64::consts::PI,
        phi in 0.0f64..(2.0 * std::f64::consts::PI),
    ) {
        let model = StiffnessModel::from_normalized(VoigtMatrix::from_upper(upper));
        let n = Direction::from_angles(theta, phi);
        let gamma = ChristoffelMatrix::new(&model, &n);
        for i in 0..3 {
            for k in 0..3 {
                let a = christoffel_entry(&model, &n, i, k);
                let b = christoffel_entry(&model, &n, k, i);
                prop_assert!((a - b).abs() <= 1e-12 * (1.0 + a.abs()));
                prop_assert!((gamma.g[i][k] - a).abs() <= 1e-12 * (1.0 + a.abs()));
            }
        }
    }

    /// Homogeneity of pv(n): the qP group velocity projects onto the phase velocity.
    #[test]
    fn qp_group_velocity_projects_to_phase_velocity(
        theta in 0.01f64..3.13,
        phi in 0.0f64..(2.0 * std::f64::consts::PI),
    ) {
        let model = triclinic();
        let n = Direction::from_angles(theta, phi);
        let sol = WaveSolution::solve(&model, &n);
        let v = sol.group_velocity(Branch::QP);
        let pv = sol.phase_velocity(Branch::QP);
        prop_assert!((v.dot(&n) - pv).abs() < 1e-8 * pv, "v·n = {} vs pv = {}", v.dot(&n), pv);
        prop_assert!(v.magnitude() >= pv * (1.0 - 1e-10));
    }

    /// Surface cells reproduce the standalone evaluation exactly.
    #[test]
    fn grid_cell_equals_standalone(n_points in 4usize..150, pick in 0usize..10_000) {
        let model = triclinic();
        let surface = evaluate_velocity_surface(&model, n_points, Branch::QP).unwrap();
        let (i, j) = surface.grid.cell(pick % surface.grid.len());
        let v = group_velocity(&model, &surface.grid.direction(i, j), Branch::QP);
        prop_assert_eq!(surface.vx[[i, j]], v.vx);
        prop_assert_eq!(surface.vy[[i, j]], v.vy);
        prop_assert_eq!(surface.vz[[i, j]], v.vz);
    }
}

// ── Magnetic Properties ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Without magnetoelastic coupling the field changes nothing.
    #[test]
    fn uncoupled_field_leaves_velocity_unchanged(
        hx in 0.5f64..2.0,
        hy in -2.0f64..2.0,
        hz in -2.0f64..2.0,
        theta in 0.1f64..3.0,
        phi in 0.0f64..6.2,
    ) {
        let state = MagneticState::from_user_units(1.001, 0.000001, 0.000001, [hx, hy, hz]);
        let elastic = VoigtMatrix::cubic(200.12577, 150.45677, 100.27777);
        let analysis =
            MagneticAnalysis::run(CubicI { b1: 0.0, b2: 0.0 }, state, &elastic, 10000.429).unwrap();
        let fv = analysis.evaluate(&Direction::from_angles(theta, phi), Branch::QP);
        prop_assert_eq!(fv.fractional_change, 0.0);
    }

    /// Closed-form ∂²E/∂θ² and ∂²E/∂φ² match central differences.
    #[test]
    fn curvatures_match_finite_difference(
        k1 in -1.0e5f64..1.0e5,
        k2 in -5.0e4f64..5.0e4,
        h in prop::array::uniform3(-1.0e5f64..1.0e5),
        theta in 0.2f64..2.9,
        phi in 0.0f64..6.2,
        hexagonal in any::<bool>(),
    ) {
        let state = MagneticState { ms: 8.0e5, k1, k2, field: h };
        let scale = k1.abs() + k2.abs() + 1.0e5 * 8.0e5 * 4.0e-7 * std::f64::consts::PI * 2.0;
        let check = |sym: &dyn MagneticSymmetry| -> Result<(), TestCaseError> {
            let curv = sym.second_derivatives(&state, theta, phi);
            let fd_tt = central_second(|t| sym.free_energy(&state, t, phi), theta, 1e-4);
            let fd_pp = central_second(|p| sym.free_energy(&state, theta, p), phi, 1e-4);
            prop_assert!((curv.ett - fd_tt).abs() < 1e-5 * scale, "ett {} vs {}", curv.ett, fd_tt);
            prop_assert!((curv.epp - fd_pp).abs() < 1e-5 * scale, "epp {} vs {}", curv.epp, fd_pp);
            Ok(())
        };
        if hexagonal {
            check(&HexagonalI { b21: 0.0, b22: 0.0, b3: 0.0, b4: 0.0 })?;
        } else {
            check(&CubicI { b1: 0.0, b2: 0.0 })?;
        }
    }
}
