// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Error Types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

/// Errors surfaced by configuration, input normalization and model construction.
///
/// Acoustic-axis singularities and optimizer non-convergence are not errors:
/// the former show up as non-finite velocities, the latter as
/// `EquilibriumDirection::converged == false`.
#[derive(Error, Debug)]
pub enum VelcrysError {
    #[error("Invalid propagation direction: wave vector ({kx}, {ky}, {kz}) has no direction")]
    InvalidDirection { kx: f64, ky: f64, kz: f64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type VelcrysResult<T> = Result<T, VelcrysError>;
