// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Magnetoelastic Corrector
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Field-dependent stiffness: equilibrium → susceptibility → ΔC → corrected
//! model, computed once per parameter set and reused for every direction.

use crate::christoffel::WaveSolution;
use crate::magnetic::{find_equilibrium, susceptibility, EnergyCurvature, MagneticSymmetry};
use serde::Serialize;
use velcrys_math::nelder_mead::NelderMeadConfig;
use velcrys_types::constants::GPA_TO_PA;
use velcrys_types::error::VelcrysResult;
use velcrys_types::state::{
    Branch, Direction, EquilibriumDirection, GroupVelocity, MagneticState, SusceptibilityTensor,
};
use velcrys_types::voigt::{StiffnessModel, VoigtMatrix};

/// Normalized stiffness of C + ΔC (both GPa).
pub fn corrected_stiffness(
    elastic: &VoigtMatrix,
    correction: &VoigtMatrix,
    density: f64,
) -> VelcrysResult<StiffnessModel> {
    StiffnessModel::from_elastic(&(*elastic + *correction), density)
}

/// Velocities with and without the field for one direction and branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldVelocity {
    pub corrected: GroupVelocity,
    pub zero_field: GroupVelocity,
    /// (|v| − |v0|) / |v0|.
    pub fractional_change: f64,
}

/// Magnetic state resolved to a corrected stiffness model.
#[derive(Debug, Clone)]
pub struct MagneticAnalysis<S> {
    pub symmetry: S,
    pub state: MagneticState,
    pub equilibrium: EquilibriumDirection,
    pub curvature: EnergyCurvature,
    pub susceptibility: SusceptibilityTensor,
    /// ΔC [GPa].
    pub correction: VoigtMatrix,
    pub zero_field: StiffnessModel,
    pub corrected: StiffnessModel,
}

impl<S: MagneticSymmetry> MagneticAnalysis<S> {
    /// Solve the equilibrium and build both stiffness models.
    ///
    /// `elastic` is the zero-field tensor in GPa, `density` in kg/m³.
    pub fn run(
        symmetry: S,
        state: MagneticState,
        elastic: &VoigtMatrix,
        density: f64,
    ) -> VelcrysResult<Self> {
        Self::run_with(symmetry, state, elastic, density, &NelderMeadConfig::default())
    }

    pub fn run_with(
        symmetry: S,
        state: MagneticState,
        elastic: &VoigtMatrix,
        density: f64,
        cfg: &NelderMeadConfig,
    ) -> VelcrysResult<Self> {
        state.validate()?;
        let zero_field = StiffnessModel::from_elastic(elastic, density)?;

        let equilibrium = find_equilibrium(&symmetry, &state, cfg);
        let curvature = symmetry.second_derivatives(&state, equilibrium.theta, equilibrium.phi);
        let susceptibility = susceptibility(state.ms, &equilibrium, &curvature);
        // A flat landscape makes χ singular; with no coupling ΔC is still zero.
        let correction = if symmetry.is_uncoupled() {
            VoigtMatrix::zeros()
        } else {
            symmetry.magnetoelastic_correction(&susceptibility, equilibrium.cosines(), state.ms)
        };
        if !correction.is_finite() {
            log::debug!(
                "{}: non-finite stiffness correction (ett={:.3e}, tangent_phi={:.3e})",
                symmetry.name(),
                curvature.ett,
                curvature.tangent_phi
            );
        }
        // Non-finite corrections propagate into the model as singular output.
        let corrected = StiffnessModel::from_normalized(
            *zero_field.matrix() + correction.scaled(GPA_TO_PA / density),
        );

        Ok(MagneticAnalysis {
            symmetry,
            state,
            equilibrium,
            curvature,
            susceptibility,
            correction,
            zero_field,
            corrected,
        })
    }

    pub fn evaluate(&self, direction: &Direction, branch: Branch) -> FieldVelocity {
        let corrected = WaveSolution::solve(&self.corrected, direction).group_velocity(branch);
        let zero_field = WaveSolution::solve(&self.zero_field, direction).group_velocity(branch);
        let v0 = zero_field.magnitude();
        FieldVelocity {
            corrected,
            zero_field,
            fractional_change: (corrected.magnitude() - v0) / v0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnetic::{CubicI, HexagonalI};

    fn cubic_elastic() -> VoigtMatrix {
        VoigtMatrix::cubic(200.12577, 150.45677, 100.27777)
    }

    fn field_state() -> MagneticState {
        MagneticState::from_user_units(
            1.001,
            0.000001,
            0.000001,
            [1.995774956, 0.865988622, -1.310698633],
        )
    }

    #[test]
    fn test_zero_constants_leave_velocity_unchanged() {
        let sym = CubicI { b1: 0.0, b2: 0.0 };
        let analysis = MagneticAnalysis::run(sym, field_state(), &cubic_elastic(), 10000.429).unwrap();
        assert_eq!(analysis.correction.max_abs(), 0.0);
        let n = Direction::from_wave_vector([0.3, -0.4, 0.5]).unwrap();
        for branch in Branch::ALL {
            let fv = analysis.evaluate(&n, branch);
            assert_eq!(fv.fractional_change, 0.0);
            assert_eq!(fv.corrected, fv.zero_field);
        }
    }

    #[test]
    fn test_uncoupled_flat_landscape_gives_zero_correction() {
        // K1 = K2 = 0 and H = 0: every curvature vanishes and χ is singular.
        let flat = MagneticState::from_user_units(1.001, 0.0, 0.0, [0.0; 3]);
        let hex = HexagonalI {
            b21: 0.0,
            b22: 0.0,
            b3: 0.0,
            b4: 0.0,
        };
        let hex_elastic = VoigtMatrix::hexagonal(200.12577, 150.45677, 120.0, 180.0, 100.27777);
        let cubic_sym = CubicI { b1: 0.0, b2: 0.0 };
        let cubic = MagneticAnalysis::run(cubic_sym, flat, &cubic_elastic(), 10000.429).unwrap();
        let hexagonal = MagneticAnalysis::run(hex, flat, &hex_elastic, 10000.429).unwrap();
        assert!(!cubic.susceptibility.is_finite());

        let n = Direction::from_wave_vector([0.3, -0.4, 0.5]).unwrap();
        for (correction, corrected, zero_field) in [
            (&cubic.correction, &cubic.corrected, &cubic.zero_field),
            (&hexagonal.correction, &hexagonal.corrected, &hexagonal.zero_field),
        ] {
            assert_eq!(correction.max_abs(), 0.0);
            assert!(correction.is_finite());
            assert_eq!(corrected.matrix(), zero_field.matrix());
        }
        for branch in Branch::ALL {
            for fv in [cubic.evaluate(&n, branch), hexagonal.evaluate(&n, branch)] {
                assert_eq!(fv.fractional_change, 0.0, "{:?}", branch);
                assert_eq!(fv.corrected, fv.zero_field);
            }
        }
    }

    #[test]
    fn test_corrected_matches_explicit_sum() {
        let sym = CubicI {
            b1: 5.3301e6,
            b2: -8.0781e6,
        };
        let analysis = MagneticAnalysis::run(sym, field_state(), &cubic_elastic(), 10000.429).unwrap();
        let explicit = corrected_stiffness(&cubic_elastic(), &analysis.correction, 10000.429).unwrap();
        for i in 1..=6 {
            for j in 1..=6 {
                let a = analysis.corrected.a(i, j);
                let b = explicit.a(i, j);
                assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0), "a{i}{j}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_field_correction_is_small_and_finite() {
        let sym = CubicI {
            b1: 5.3301e6,
            b2: -8.0781e6,
        };
        let analysis = MagneticAnalysis::run(sym, field_state(), &cubic_elastic(), 10000.429).unwrap();
        assert!(analysis.equilibrium.converged);
        assert!(analysis.correction.is_finite());
        assert!(analysis.correction.max_abs() > 0.0);
        // Saturating field: ΔC stays far below the GPa-scale stiffness.
        assert!(analysis.correction.max_abs() < 1.0);
        let n = Direction::from_wave_vector([1.995774956, 0.865988622, -1.310698633]).unwrap();
        let fv = analysis.evaluate(&n, Branch::QP);
        assert!(fv.fractional_change.is_finite());
        assert!(fv.fractional_change.abs() < 1e-2);
    }

    #[test]
    fn test_hexagonal_pipeline_runs() {
        let sym = HexagonalI {
            b21: 5.3301e6,
            b22: -8.0781e6,
            b3: 2.2201e6,
            b4: -1.7771e6,
        };
        let elastic = VoigtMatrix::hexagonal(200.12577, 150.45677, 150.45677, 100.27777, 100.27777);
        let analysis = MagneticAnalysis::run(sym, field_state(), &elastic, 10000.429).unwrap();
        assert!(analysis.correction.is_finite());
        let n = Direction::from_wave_vector([0.3, -0.4, 0.5]).unwrap();
        let fv = analysis.evaluate(&n, Branch::QP);
        assert!(fv.zero_field.magnitude() > 0.0);
        assert!(fv.fractional_change.is_finite());
    }

    #[test]
    fn test_invalid_density_rejected() {
        let sym = CubicI { b1: 1.0, b2: 1.0 };
        assert!(MagneticAnalysis::run(sym, field_state(), &cubic_elastic(), 0.0).is_err());
    }
}
