// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Magnetic Equilibrium
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Equilibrium magnetization direction and static susceptibility.

use super::{EnergyCurvature, MagneticSymmetry};
use velcrys_math::nelder_mead::{minimize, NelderMeadConfig};
use velcrys_types::state::{EquilibriumDirection, MagneticState, SusceptibilityTensor};

/// Simplex seed (θ, φ) [rad].
pub const EQUILIBRIUM_SEED: [f64; 2] = [0.2, 0.3];

/// Minimize E(θ, φ) from [`EQUILIBRIUM_SEED`].
///
/// Multi-well landscapes may end in a local minimum. A spent budget returns
/// the best vertex with `converged = false`.
pub fn find_equilibrium<S: MagneticSymmetry + ?Sized>(
    symmetry: &S,
    state: &MagneticState,
    cfg: &NelderMeadConfig,
) -> EquilibriumDirection {
    let result = minimize(
        |x: &[f64]| symmetry.free_energy(state, x[0], x[1]),
        &EQUILIBRIUM_SEED,
        cfg,
    );
    let (theta, phi) = (result.x[0], result.x[1]);
    let grad = symmetry.energy_gradient(state, theta, phi);
    let gradient_norm = (grad[0] * grad[0] + grad[1] * grad[1]).sqrt();

    if result.converged {
        log::debug!(
            "{} equilibrium θ={:.6} φ={:.6} E={:.6e} after {} iterations ({} evaluations)",
            symmetry.name(),
            theta,
            phi,
            result.value,
            result.iterations,
            result.evaluations
        );
    } else {
        log::warn!(
            "{} equilibrium search did not converge after {} iterations ({} evaluations); \
             using best point θ={:.6} φ={:.6}, |∇E|={:.3e}",
            symmetry.name(),
            result.iterations,
            result.evaluations,
            theta,
            phi,
            gradient_norm
        );
    }

    EquilibriumDirection {
        theta,
        phi,
        energy: result.value,
        iterations: result.iterations,
        evaluations: result.evaluations,
        converged: result.converged,
        gradient_norm,
    }
}

/// χ from the curvatures at equilibrium.
///
/// The in-plane response uses the tangent curvature along ê_φ, so a
/// magnetization at a pole yields a finite tensor. A flat direction
/// (zero curvature) yields non-finite components.
pub fn susceptibility(
    ms: f64,
    eq: &EquilibriumDirection,
    curvature: &EnergyCurvature,
) -> SusceptibilityTensor {
    let (st, ct) = eq.theta.sin_cos();
    let (sp, cp) = eq.phi.sin_cos();
    let m2 = ms * ms;
    let t = 1.0 / curvature.ett;
    let p = 1.0 / curvature.tangent_phi;

    SusceptibilityTensor {
        xx: m2 * (ct * ct * cp * cp * t + sp * sp * p),
        yy: m2 * (ct * ct * sp * sp * t + cp * cp * p),
        zz: m2 * st * st * t,
        xy: -m2 * (ct * ct * cp * sp * t - cp * sp * p),
        xz: -m2 * st * ct * cp * t,
        yz: -m2 * st * ct * sp * t,
    }
}
