// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Group velocity of elastic waves in anisotropic crystals.
//!
//! Christoffel solve and branch velocities, spherical surface sweeps, and
//! field-dependent stiffness corrections for cubic and hexagonal magnets.

pub mod christoffel;
pub mod grid;
pub mod magnetic;
pub mod magnetoelastic;
pub mod scenario;
