// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{MEGA, MU0_SI};
use crate::error::{VelcrysError, VelcrysResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Unit propagation direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    n: [f64; 3],
}

impl Direction {
    /// Normalize a wave vector. Zero-length or non-finite input has no direction.
    pub fn from_wave_vector(k: [f64; 3]) -> VelcrysResult<Self> {
        let norm = (k[0] * k[0] + k[1] * k[1] + k[2] * k[2]).sqrt();
        if !norm.is_finite() || norm == 0.0 {
            return Err(VelcrysError::InvalidDirection {
                kx: k[0],
                ky: k[1],
                kz: k[2],
            });
        }
        Ok(Direction {
            n: [k[0] / norm, k[1] / norm, k[2] / norm],
        })
    }

    /// n = (sinθ cosφ, sinθ sinφ, cosθ).
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        Direction {
            n: [st * cp, st * sp, ct],
        }
    }

    #[inline]
    pub fn cosines(&self) -> [f64; 3] {
        self.n
    }

    pub fn x(&self) -> f64 {
        self.n[0]
    }
    pub fn y(&self) -> f64 {
        self.n[1]
    }
    pub fn z(&self) -> f64 {
        self.n[2]
    }
}

/// Elastic-wave branch, ordered by the cubic solver's root order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Branch {
    /// Quasi-longitudinal (largest root).
    #[default]
    #[serde(rename = "qP")]
    QP,
    #[serde(rename = "qS1")]
    QS1,
    #[serde(rename = "qS2")]
    QS2,
}

impl Branch {
    pub const ALL: [Branch; 3] = [Branch::QP, Branch::QS1, Branch::QS2];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Branch::QP => 0,
            Branch::QS1 => 1,
            Branch::QS2 => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Branch::QP => "qP",
            Branch::QS1 => "qS1",
            Branch::QS2 => "qS2",
        }
    }
}

/// Group velocity vector [m/s].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupVelocity {
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl GroupVelocity {
    pub fn magnitude(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy + self.vz * self.vz).sqrt()
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.vx, self.vy, self.vz]
    }

    /// Projection onto a direction; equals the phase velocity for the same branch.
    pub fn dot(&self, n: &Direction) -> f64 {
        let c = n.cosines();
        self.vx * c[0] + self.vy * c[1] + self.vz * c[2]
    }

    pub fn is_finite(&self) -> bool {
        self.vx.is_finite() && self.vy.is_finite() && self.vz.is_finite()
    }
}

/// Magnetic material state in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticState {
    /// Saturation magnetization Ms [A/m].
    pub ms: f64,
    /// First anisotropy constant [J/m³].
    pub k1: f64,
    /// Second anisotropy constant [J/m³].
    pub k2: f64,
    /// Applied field H [A/m].
    pub field: [f64; 3],
}

impl MagneticState {
    /// Convert from the customary input units: μ0Ms and μ0H in T, K1 and K2 in MJ/m³.
    pub fn from_user_units(mu0_ms: f64, k1_mj: f64, k2_mj: f64, mu0_h: [f64; 3]) -> Self {
        MagneticState {
            ms: mu0_ms / MU0_SI,
            k1: k1_mj * MEGA,
            k2: k2_mj * MEGA,
            field: [mu0_h[0] / MU0_SI, mu0_h[1] / MU0_SI, mu0_h[2] / MU0_SI],
        }
    }

    /// μ0·Ms·H [J/m³]; the Zeeman energy density is minus its projection on α.
    pub fn zeeman_vector(&self) -> [f64; 3] {
        let s = MU0_SI * self.ms;
        [s * self.field[0], s * self.field[1], s * self.field[2]]
    }

    pub fn validate(&self) -> VelcrysResult<()> {
        if !self.ms.is_finite() || self.ms <= 0.0 {
            return Err(VelcrysError::PhysicsViolation(format!(
                "saturation magnetization must be finite and > 0 A/m, got {}",
                self.ms
            )));
        }
        if !self.k1.is_finite() || !self.k2.is_finite() {
            return Err(VelcrysError::ConfigError(
                "anisotropy constants must be finite".to_string(),
            ));
        }
        if self.field.iter().any(|h| !h.is_finite()) {
            return Err(VelcrysError::ConfigError(
                "applied field must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Equilibrium magnetization direction from the free-energy minimization.
///
/// `theta`/`phi` are the minimizer's raw coordinates and may fall outside
/// [0, π] × [0, 2π); `cosines()` is the canonical direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquilibriumDirection {
    pub theta: f64,
    pub phi: f64,
    /// Free energy density at the minimum [J/m³].
    pub energy: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
    /// |(∂E/∂θ, ∂E/∂φ)| at the returned point.
    pub gradient_norm: f64,
}

impl EquilibriumDirection {
    pub fn cosines(&self) -> [f64; 3] {
        Direction::from_angles(self.theta, self.phi).cosines()
    }

    pub fn direction(&self) -> Direction {
        Direction::from_angles(self.theta, self.phi)
    }
}

/// Static magnetic susceptibility of the equilibrium state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SusceptibilityTensor {
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

impl SusceptibilityTensor {
    pub fn as_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.xx, self.xy, self.xz],
            [self.xy, self.yy, self.yz],
            [self.xz, self.yz, self.zz],
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.as_matrix().iter().flatten().all(|v| v.is_finite())
    }
}

/// Spherical (θ, φ) sampling grid.
/// θ = linspace(0, π, side) along rows, φ = linspace(0, 2π, side) along columns.
#[derive(Debug, Clone)]
pub struct SphericalGrid {
    pub side: usize,
    pub theta: Array1<f64>,
    pub phi: Array1<f64>,
}

impl SphericalGrid {
    pub fn new(side: usize) -> Self {
        SphericalGrid {
            side,
            theta: Array1::linspace(0.0, PI, side),
            phi: Array1::linspace(0.0, 2.0 * PI, side),
        }
    }

    /// Grid for a requested point budget N; the side is ⌊√N⌋.
    pub fn from_point_count(n_points: usize) -> VelcrysResult<Self> {
        let side = integer_sqrt(n_points);
        if side == 0 {
            return Err(VelcrysError::ConfigError(format!(
                "grid needs at least one point, got n_points = {n_points}"
            )));
        }
        Ok(Self::new(side))
    }

    pub fn len(&self) -> usize {
        self.side * self.side
    }

    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// Row-major (i_theta, j_phi) of a flattened cell index.
    #[inline]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.side, index % self.side)
    }

    pub fn direction(&self, i: usize, j: usize) -> Direction {
        Direction::from_angles(self.theta[i], self.phi[j])
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_normalizes() {
        let n = Direction::from_wave_vector([3.0, 0.0, 4.0]).unwrap();
        assert!((n.x() - 0.6).abs() < 1e-15);
        assert!((n.z() - 0.8).abs() < 1e-15);
        assert_eq!(n.y(), 0.0);
    }

    #[test]
    fn test_zero_wave_vector_rejected() {
        let err = Direction::from_wave_vector([0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, VelcrysError::InvalidDirection { .. }));
        assert!(Direction::from_wave_vector([f64::NAN, 1.0, 0.0]).is_err());
    }

    #[test]
    fn test_direction_from_angles() {
        let n = Direction::from_angles(PI / 2.0, 0.0);
        assert!((n.x() - 1.0).abs() < 1e-15);
        assert!(n.z().abs() < 1e-15);
        let pole = Direction::from_angles(0.0, 1.234);
        assert_eq!(pole.cosines(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_branch_serde_labels() {
        let json = serde_json::to_string(&Branch::QS1).unwrap();
        assert_eq!(json, "\"qS1\"");
        let back: Branch = serde_json::from_str("\"qS2\"").unwrap();
        assert_eq!(back, Branch::QS2);
        assert_eq!(Branch::default(), Branch::QP);
    }

    #[test]
    fn test_user_unit_conversion() {
        let state = MagneticState::from_user_units(1.0, 0.5, -0.25, [0.0, 0.0, 1.0]);
        assert!((state.ms * MU0_SI - 1.0).abs() < 1e-12);
        assert!((state.k1 - 5.0e5).abs() < 1e-6);
        assert!((state.k2 + 2.5e5).abs() < 1e-6);
        assert!((state.field[2] * MU0_SI - 1.0).abs() < 1e-12);
        // μ0·Ms·H = (μ0Ms)(μ0H)/μ0
        assert!((state.zeeman_vector()[2] - 1.0 / MU0_SI).abs() < 1e-3);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_magnetic_state_validation() {
        let state = MagneticState::from_user_units(0.0, 1.0, 1.0, [0.0; 3]);
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_grid_side_from_point_count() {
        assert_eq!(SphericalGrid::from_point_count(2000).unwrap().side, 44);
        assert_eq!(SphericalGrid::from_point_count(100).unwrap().side, 10);
        assert_eq!(SphericalGrid::from_point_count(1).unwrap().side, 1);
        assert!(SphericalGrid::from_point_count(0).is_err());
    }

    #[test]
    fn test_grid_endpoints() {
        let grid = SphericalGrid::new(11);
        assert_eq!(grid.len(), 121);
        assert!((grid.theta[10] - PI).abs() < 1e-12);
        assert!((grid.phi[10] - 2.0 * PI).abs() < 1e-12);
        assert_eq!(grid.cell(23), (2, 1));
    }
}
