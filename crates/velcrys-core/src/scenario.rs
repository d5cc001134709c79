// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Calculation Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Config-driven entry points: single direction or full sphere, with or
//! without an applied magnetic field.

use crate::christoffel::{RootMultiplicity, WaveSolution};
use crate::grid::{evaluate_field_surface, evaluate_velocity_surface, FieldSurface, VelocitySurface};
use crate::magnetic::CrystalSymmetry;
use crate::magnetoelastic::{FieldVelocity, MagneticAnalysis};
use ndarray::Array2;
use serde::Serialize;
use velcrys_types::config::{MagneticConfig, PointConfig, SurfaceConfig};
use velcrys_types::constants::{SOUND_SPEED_MAX, SOUND_SPEED_MIN};
use velcrys_types::error::{VelcrysError, VelcrysResult};
use velcrys_types::state::{Branch, Direction, EquilibriumDirection, GroupVelocity, SusceptibilityTensor};
use velcrys_types::voigt::{StiffnessModel, VOIGT_INDEPENDENT};

/// Single-direction result.
#[derive(Debug, Clone, Serialize)]
pub struct PointReport {
    /// Unit wave normal.
    pub direction: [f64; 3],
    pub branch: Branch,
    pub velocity: GroupVelocity,
    /// |v| [m/s].
    pub magnitude: f64,
    /// Re √λ [m/s].
    pub phase_velocity: f64,
    /// "distinct", "pair" or "triple".
    pub degeneracy: &'static str,
}

fn degeneracy_label(m: RootMultiplicity) -> &'static str {
    match m {
        RootMultiplicity::Distinct => "distinct",
        RootMultiplicity::Pair { .. } => "pair",
        RootMultiplicity::Triple => "triple",
    }
}

pub fn run_point(cfg: &PointConfig) -> VelcrysResult<PointReport> {
    cfg.validate()?;
    let model = StiffnessModel::from_elastic(&cfg.elastic.to_voigt(), cfg.density)?;
    let direction = Direction::from_wave_vector(cfg.wave_vector)?;
    let solution = WaveSolution::solve(&model, &direction);
    let velocity = solution.group_velocity(cfg.branch);
    log::info!(
        "{} along {:?}: |v| = {:.3} m/s",
        cfg.branch.label(),
        direction.cosines(),
        velocity.magnitude()
    );
    if !(SOUND_SPEED_MIN..=SOUND_SPEED_MAX).contains(&velocity.magnitude()) {
        log::warn!(
            "|v| = {:.3e} m/s lies outside the {}..{} m/s band of real crystals; check units",
            velocity.magnitude(),
            SOUND_SPEED_MIN,
            SOUND_SPEED_MAX
        );
    }
    Ok(PointReport {
        direction: direction.cosines(),
        branch: cfg.branch,
        velocity,
        magnitude: velocity.magnitude(),
        phase_velocity: solution.phase_velocity(cfg.branch),
        degeneracy: degeneracy_label(solution.multiplicity),
    })
}

pub fn run_surface(cfg: &SurfaceConfig) -> VelcrysResult<VelocitySurface> {
    cfg.validate()?;
    let model = StiffnessModel::from_elastic(&cfg.elastic.to_voigt(), cfg.density)?;
    evaluate_velocity_surface(&model, cfg.n_points, cfg.branch)
}

/// Single-direction magnetoelastic result.
#[derive(Debug, Clone, Serialize)]
pub struct MagneticPointReport {
    pub symmetry: &'static str,
    pub equilibrium: EquilibriumDirection,
    pub equilibrium_cosines: [f64; 3],
    pub susceptibility: SusceptibilityTensor,
    /// Upper triangle of ΔC [GPa], row-major.
    pub correction_gpa: [f64; VOIGT_INDEPENDENT],
    pub branch: Branch,
    pub velocity: FieldVelocity,
}

fn magnetic_analysis(cfg: &MagneticConfig) -> VelcrysResult<MagneticAnalysis<CrystalSymmetry>> {
    cfg.validate()?;
    MagneticAnalysis::run(
        CrystalSymmetry::from(&cfg.crystal),
        cfg.magnetic_state(),
        &cfg.crystal.elastic(),
        cfg.density,
    )
}

pub fn run_magnetic_point(cfg: &MagneticConfig) -> VelcrysResult<MagneticPointReport> {
    let k = cfg.wave_vector.ok_or_else(|| {
        VelcrysError::ConfigError("magnetic point run needs a wave_vector".to_string())
    })?;
    let direction = Direction::from_wave_vector(k)?;
    let analysis = magnetic_analysis(cfg)?;
    let velocity = analysis.evaluate(&direction, cfg.branch);
    log::info!(
        "{} {}: Δ|v|/|v0| = {:.4e}",
        cfg.crystal.label(),
        cfg.branch.label(),
        velocity.fractional_change
    );
    Ok(MagneticPointReport {
        symmetry: cfg.crystal.label(),
        equilibrium: analysis.equilibrium,
        equilibrium_cosines: analysis.equilibrium.cosines(),
        susceptibility: analysis.susceptibility,
        correction_gpa: analysis.correction.upper(),
        branch: cfg.branch,
        velocity,
    })
}

/// Field surface with its deformed sphere at the configured scale.
#[derive(Debug, Clone)]
pub struct MagneticSurfaceReport {
    pub surface: FieldSurface,
    pub scale: f64,
    /// (1 + scale·Δ|v|/|v0|)·n, one array per Cartesian axis.
    pub deformed: [Array2<f64>; 3],
}

pub fn run_magnetic_surface(cfg: &MagneticConfig) -> VelcrysResult<MagneticSurfaceReport> {
    let n_points = cfg.n_points.ok_or_else(|| {
        VelcrysError::ConfigError("magnetic surface run needs n_points".to_string())
    })?;
    let analysis = magnetic_analysis(cfg)?;
    let surface = evaluate_field_surface(&analysis, n_points, cfg.branch)?;
    log::info!(
        "{} {}: max |Δ|v|/|v0|| = {:.4e}, scale {}",
        cfg.crystal.label(),
        cfg.branch.label(),
        surface.max_abs_change(),
        cfg.scale
    );
    Ok(MagneticSurfaceReport {
        deformed: surface.deformed_surface(cfg.scale),
        scale: cfg.scale,
        surface,
    })
}
