// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Magnetic Free Energy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Anisotropy + Zeeman free energy of a single-domain magnet.
//!
//! ```text
//!   E(θ, φ) = F(α; K1, K2) − μ0 Ms H·α,   α = (sinθ cosφ, sinθ sinφ, cosθ)
//! ```
//!
//! Each crystal class supplies F with its Cartesian gradient and Hessian in
//! the direction cosines. Angular derivatives follow from the chain rule on
//! the local frame ê_θ = ∂α/∂θ, ê_φ = (−sinφ, cosφ, 0):
//!
//! ```text
//!   ∂E/∂θ   = g·ê_θ
//!   ∂E/∂φ   = sinθ g·ê_φ
//!   ∂²E/∂θ² = ê_θᵀ H ê_θ − α·g
//!   ∂²E/∂φ² = sin²θ (ê_φᵀ H ê_φ − α·g) − sinθ cosθ g·ê_θ
//! ```
//!
//! where g and H are the gradient and Hessian of E as a function of α.

pub mod cubic;
pub mod equilibrium;
pub mod hexagonal;

pub use cubic::CubicI;
pub use equilibrium::{find_equilibrium, susceptibility, EQUILIBRIUM_SEED};
pub use hexagonal::HexagonalI;

use velcrys_types::config::MagneticCrystal;
use velcrys_types::constants::MEGA;
use velcrys_types::state::{MagneticState, SusceptibilityTensor};
use velcrys_types::voigt::VoigtMatrix;

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

/// Curvatures of E at a point on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyCurvature {
    /// ∂²E/∂θ².
    pub ett: f64,
    /// ∂²E/∂φ².
    pub epp: f64,
    /// Curvature along ê_φ in the tangent plane, epp / sin²θ at equilibrium.
    /// Stays finite at the poles where epp itself vanishes.
    pub tangent_phi: f64,
}

/// Capability interface of a magnetic crystal class.
pub trait MagneticSymmetry {
    fn name(&self) -> &'static str;

    /// Anisotropy energy density F(α) [J/m³].
    fn anisotropy_energy(&self, state: &MagneticState, alpha: Vec3) -> f64;

    /// ∇_α F.
    fn anisotropy_gradient(&self, state: &MagneticState, alpha: Vec3) -> Vec3;

    /// ∇²_α F.
    fn anisotropy_hessian(&self, state: &MagneticState, alpha: Vec3) -> Mat3;

    /// Magnetoelastic stiffness correction ΔC [GPa] for susceptibility `chi`
    /// and magnetization direction `alpha`.
    fn magnetoelastic_correction(
        &self,
        chi: &SusceptibilityTensor,
        alpha: Vec3,
        ms: f64,
    ) -> VoigtMatrix;

    /// True when every magnetoelastic constant is zero, so ΔC vanishes
    /// identically whatever the susceptibility.
    fn is_uncoupled(&self) -> bool;

    /// Total free energy density E(θ, φ).
    fn free_energy(&self, state: &MagneticState, theta: f64, phi: f64) -> f64 {
        let alpha = cosines(theta, phi);
        self.anisotropy_energy(state, alpha) - dot(state.zeeman_vector(), alpha)
    }

    /// (∂E/∂θ, ∂E/∂φ).
    fn energy_gradient(&self, state: &MagneticState, theta: f64, phi: f64) -> [f64; 2] {
        let alpha = cosines(theta, phi);
        let g = total_gradient(self, state, alpha);
        let (e_theta, e_phi) = frame(theta, phi);
        [dot(g, e_theta), theta.sin() * dot(g, e_phi)]
    }

    /// Closed-form second derivatives at (θ, φ).
    fn second_derivatives(&self, state: &MagneticState, theta: f64, phi: f64) -> EnergyCurvature {
        let alpha = cosines(theta, phi);
        let g = total_gradient(self, state, alpha);
        // Zeeman energy is linear in α: the Hessian is purely anisotropic.
        let h = self.anisotropy_hessian(state, alpha);
        let (e_theta, e_phi) = frame(theta, phi);
        let radial = dot(alpha, g);

        let ett = quad(&h, e_theta) - radial;
        let tangent_phi = quad(&h, e_phi) - radial;
        let (st, ct) = theta.sin_cos();
        let epp = st * st * tangent_phi - st * ct * dot(g, e_theta);

        EnergyCurvature {
            ett,
            epp,
            tangent_phi,
        }
    }
}

/// Closed set of supported crystal classes, dispatched statically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrystalSymmetry {
    Cubic(CubicI),
    Hexagonal(HexagonalI),
}

impl From<&MagneticCrystal> for CrystalSymmetry {
    fn from(crystal: &MagneticCrystal) -> Self {
        match *crystal {
            MagneticCrystal::CubicI { b1, b2, .. } => CrystalSymmetry::Cubic(CubicI {
                b1: b1 * MEGA,
                b2: b2 * MEGA,
            }),
            MagneticCrystal::HexagonalI {
                b21, b22, b3, b4, ..
            } => CrystalSymmetry::Hexagonal(HexagonalI {
                b21: b21 * MEGA,
                b22: b22 * MEGA,
                b3: b3 * MEGA,
                b4: b4 * MEGA,
            }),
        }
    }
}

impl MagneticSymmetry for CrystalSymmetry {
    fn name(&self) -> &'static str {
        match self {
            CrystalSymmetry::Cubic(s) => s.name(),
            CrystalSymmetry::Hexagonal(s) => s.name(),
        }
    }

    fn is_uncoupled(&self) -> bool {
        match self {
            CrystalSymmetry::Cubic(s) => s.is_uncoupled(),
            CrystalSymmetry::Hexagonal(s) => s.is_uncoupled(),
        }
    }

    fn anisotropy_energy(&self, state: &MagneticState, alpha: Vec3) -> f64 {
        match self {
            CrystalSymmetry::Cubic(s) => s.anisotropy_energy(state, alpha),
            CrystalSymmetry::Hexagonal(s) => s.anisotropy_energy(state, alpha),
        }
    }

    fn anisotropy_gradient(&self, state: &MagneticState, alpha: Vec3) -> Vec3 {
        match self {
            CrystalSymmetry::Cubic(s) => s.anisotropy_gradient(state, alpha),
            CrystalSymmetry::Hexagonal(s) => s.anisotropy_gradient(state, alpha),
        }
    }

    fn anisotropy_hessian(&self, state: &MagneticState, alpha: Vec3) -> Mat3 {
        match self {
            CrystalSymmetry::Cubic(s) => s.anisotropy_hessian(state, alpha),
            CrystalSymmetry::Hexagonal(s) => s.anisotropy_hessian(state, alpha),
        }
    }

    fn magnetoelastic_correction(
        &self,
        chi: &SusceptibilityTensor,
        alpha: Vec3,
        ms: f64,
    ) -> VoigtMatrix {
        match self {
            CrystalSymmetry::Cubic(s) => s.magnetoelastic_correction(chi, alpha, ms),
            CrystalSymmetry::Hexagonal(s) => s.magnetoelastic_correction(chi, alpha, ms),
        }
    }
}

/// α(θ, φ).
#[inline]
pub fn cosines(theta: f64, phi: f64) -> Vec3 {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    [st * cp, st * sp, ct]
}

/// (ê_θ, ê_φ) at (θ, φ).
#[inline]
pub fn frame(theta: f64, phi: f64) -> (Vec3, Vec3) {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    ([ct * cp, ct * sp, -st], [-sp, cp, 0.0])
}

#[inline]
fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn quad(h: &Mat3, v: Vec3) -> f64 {
    let mut s = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            s += v[i] * h[i][j] * v[j];
        }
    }
    s
}

/// ∇_α E = ∇F − μ0 Ms H.
fn total_gradient<S: MagneticSymmetry + ?Sized>(sym: &S, state: &MagneticState, alpha: Vec3) -> Vec3 {
    let g = sym.anisotropy_gradient(state, alpha);
    let z = state.zeeman_vector();
    [g[0] - z[0], g[1] - z[1], g[2] - z[2]]
}
