// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Numerical primitives for VelCrys-RS.
//!
//! Closed-form cubic roots for the Christoffel characteristic polynomial and
//! a Nelder-Mead simplex minimizer for the magnetic free energy.

pub mod cubic;
pub mod nelder_mead;
