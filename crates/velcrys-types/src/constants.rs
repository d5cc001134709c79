// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::PI;

/// Vacuum permeability (H/m), classical SI value 4π·10⁻⁷.
pub const MU0_SI: f64 = 4.0 * PI * 1e-7;

/// Stiffness input unit (GPa) to Pa.
pub const GPA_TO_PA: f64 = 1e9;

/// Pa back to GPa, used for magnetoelastic corrections.
pub const PA_TO_GPA: f64 = 1e-9;

/// MPa (magnetoelastic constants) and MJ/m³ (anisotropy constants) to SI.
pub const MEGA: f64 = 1e6;

/// Sound-speed range [m/s] observed in real crystals; used as a sanity band.
pub const SOUND_SPEED_MIN: f64 = 100.0;
pub const SOUND_SPEED_MAX: f64 = 20_000.0;
