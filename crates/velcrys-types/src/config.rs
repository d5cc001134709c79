// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::MEGA;
use crate::error::{VelcrysError, VelcrysResult};
use crate::state::{Branch, MagneticState, SphericalGrid};
use crate::voigt::VoigtMatrix;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn load_json<T: DeserializeOwned>(path: &str) -> VelcrysResult<T> {
    let contents = std::fs::read_to_string(path)?;
    let config: T = serde_json::from_str(&contents)?;
    Ok(config)
}

fn check_density(density: f64) -> VelcrysResult<()> {
    if !density.is_finite() || density <= 0.0 {
        return Err(VelcrysError::PhysicsViolation(format!(
            "density must be finite and > 0 kg/m^3, got {density}"
        )));
    }
    Ok(())
}

fn check_points(n_points: usize) -> VelcrysResult<()> {
    SphericalGrid::from_point_count(n_points).map(|_| ())
}

/// Full 21-coefficient stiffness tensor in GPa.
/// Omitted coefficients are zero, so symmetry-reduced inputs stay short.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElasticConstants {
    #[serde(default)]
    pub c11: f64,
    #[serde(default)]
    pub c12: f64,
    #[serde(default)]
    pub c13: f64,
    #[serde(default)]
    pub c14: f64,
    #[serde(default)]
    pub c15: f64,
    #[serde(default)]
    pub c16: f64,
    #[serde(default)]
    pub c22: f64,
    #[serde(default)]
    pub c23: f64,
    #[serde(default)]
    pub c24: f64,
    #[serde(default)]
    pub c25: f64,
    #[serde(default)]
    pub c26: f64,
    #[serde(default)]
    pub c33: f64,
    #[serde(default)]
    pub c34: f64,
    #[serde(default)]
    pub c35: f64,
    #[serde(default)]
    pub c36: f64,
    #[serde(default)]
    pub c44: f64,
    #[serde(default)]
    pub c45: f64,
    #[serde(default)]
    pub c46: f64,
    #[serde(default)]
    pub c55: f64,
    #[serde(default)]
    pub c56: f64,
    #[serde(default)]
    pub c66: f64,
}

impl ElasticConstants {
    pub fn to_voigt(&self) -> VoigtMatrix {
        VoigtMatrix::from_upper([
            self.c11, self.c12, self.c13, self.c14, self.c15, self.c16, self.c22, self.c23,
            self.c24, self.c25, self.c26, self.c33, self.c34, self.c35, self.c36, self.c44,
            self.c45, self.c46, self.c55, self.c56, self.c66,
        ])
    }

    pub fn from_voigt(m: &VoigtMatrix) -> Self {
        let u = m.upper();
        ElasticConstants {
            c11: u[0],
            c12: u[1],
            c13: u[2],
            c14: u[3],
            c15: u[4],
            c16: u[5],
            c22: u[6],
            c23: u[7],
            c24: u[8],
            c25: u[9],
            c26: u[10],
            c33: u[11],
            c34: u[12],
            c35: u[13],
            c36: u[14],
            c44: u[15],
            c45: u[16],
            c46: u[17],
            c55: u[18],
            c56: u[19],
            c66: u[20],
        }
    }
}

/// Single-direction group velocity for an arbitrary (triclinic) crystal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointConfig {
    pub elastic: ElasticConstants,
    /// Mass density [kg/m³].
    pub density: f64,
    /// Wave vector k; only its direction matters.
    pub wave_vector: [f64; 3],
    #[serde(default)]
    pub branch: Branch,
}

impl PointConfig {
    pub fn from_file(path: &str) -> VelcrysResult<Self> {
        load_json(path)
    }

    pub fn validate(&self) -> VelcrysResult<()> {
        check_density(self.density)
    }
}

/// Group-velocity surface over the full sphere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub elastic: ElasticConstants,
    pub density: f64,
    /// Requested point count N; the grid side is ⌊√N⌋.
    #[serde(default = "default_n_points")]
    pub n_points: usize,
    #[serde(default)]
    pub branch: Branch,
}

impl SurfaceConfig {
    pub fn from_file(path: &str) -> VelcrysResult<Self> {
        load_json(path)
    }

    pub fn validate(&self) -> VelcrysResult<()> {
        check_density(self.density)?;
        check_points(self.n_points)
    }
}

fn default_n_points() -> usize {
    2000
}
fn default_scale() -> f64 {
    1.0
}

/// Crystal class for magnetoelastic calculations.
/// Elastic constants in GPa, magnetoelastic constants in MPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "symmetry", rename_all = "snake_case")]
pub enum MagneticCrystal {
    CubicI {
        c11: f64,
        c12: f64,
        c44: f64,
        b1: f64,
        b2: f64,
    },
    HexagonalI {
        c11: f64,
        c12: f64,
        c13: f64,
        c33: f64,
        c44: f64,
        b21: f64,
        b22: f64,
        b3: f64,
        b4: f64,
    },
}

impl MagneticCrystal {
    /// Zero-field stiffness tensor [GPa].
    pub fn elastic(&self) -> VoigtMatrix {
        match *self {
            MagneticCrystal::CubicI { c11, c12, c44, .. } => VoigtMatrix::cubic(c11, c12, c44),
            MagneticCrystal::HexagonalI {
                c11,
                c12,
                c13,
                c33,
                c44,
                ..
            } => VoigtMatrix::hexagonal(c11, c12, c13, c33, c44),
        }
    }

    /// Magnetoelastic constants converted to Pa, in declaration order.
    pub fn magnetoelastic_pa(&self) -> Vec<f64> {
        match *self {
            MagneticCrystal::CubicI { b1, b2, .. } => vec![b1 * MEGA, b2 * MEGA],
            MagneticCrystal::HexagonalI {
                b21, b22, b3, b4, ..
            } => vec![b21 * MEGA, b22 * MEGA, b3 * MEGA, b4 * MEGA],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MagneticCrystal::CubicI { .. } => "cubic_i",
            MagneticCrystal::HexagonalI { .. } => "hexagonal_i",
        }
    }
}

/// Magnetoelastic corrections under an applied field.
///
/// `wave_vector` drives the single-direction report, `n_points` the
/// fractional-change surface. Either may be omitted when only the other
/// mode is run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagneticConfig {
    pub crystal: MagneticCrystal,
    pub density: f64,
    /// μ0·Ms [T].
    pub mu0_ms: f64,
    /// Anisotropy constants [MJ/m³].
    pub k1: f64,
    pub k2: f64,
    /// μ0·H [T].
    pub mu0_h: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_vector: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_points: Option<usize>,
    #[serde(default)]
    pub branch: Branch,
    /// Exaggeration factor for the deformed-sphere view of the fractional change.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl MagneticConfig {
    pub fn from_file(path: &str) -> VelcrysResult<Self> {
        load_json(path)
    }

    pub fn magnetic_state(&self) -> MagneticState {
        MagneticState::from_user_units(self.mu0_ms, self.k1, self.k2, self.mu0_h)
    }

    pub fn validate(&self) -> VelcrysResult<()> {
        check_density(self.density)?;
        self.magnetic_state().validate()?;
        if !self.crystal.elastic().is_finite()
            || self.crystal.magnetoelastic_pa().iter().any(|b| !b.is_finite())
        {
            return Err(VelcrysError::ConfigError(format!(
                "{} constants must be finite",
                self.crystal.label()
            )));
        }
        if !self.scale.is_finite() {
            return Err(VelcrysError::ConfigError(format!(
                "scale must be finite, got {}",
                self.scale
            )));
        }
        if let Some(n) = self.n_points {
            check_points(n)?;
        }
        Ok(())
    }
}
