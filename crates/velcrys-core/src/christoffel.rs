// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Christoffel Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Christoffel matrix, characteristic cubic and branch group velocities.
//!
//! For a unit direction n the Christoffel matrix is
//!
//! ```text
//!   Γ_ik = Σ_jl a[V(i,j)][V(k,l)] n_j n_l
//! ```
//!
//! with the Voigt map V: 11→1, 22→2, 33→3, 23→4, 13→5, 12→6. Its eigenvalues
//! λ are the squared phase velocities, roots of λ³ + Bλ² + Cλ + D = 0.
//! Differentiating the characteristic polynomial implicitly gives the group
//! velocity v = ∇_n √λ in closed form:
//!
//! ```text
//!   simple root:  v_l = −(λ² ∂B_l + λ ∂C_l + ∂D_l) / (2 pv (3λ² + 2Bλ + C))
//!   double root:  v_l = −(2λ ∂B_l + ∂C_l) / (4 pv (3λ + B))
//!   triple root:  v_l = −∂B_l / (6 pv)
//! ```
//!
//! Denominators vanish on acoustic axes; the result is then large or
//! non-finite and is returned as is.

use num_complex::Complex64;
use velcrys_math::cubic::{cardano_invariants, solve_monic_cubic};
use velcrys_types::state::{Branch, Direction, GroupVelocity};
use velcrys_types::voigt::StiffnessModel;

/// Absolute tolerance on |√λi − √λj| for treating two branches as coincident.
pub const DEGENERACY_EPS: f64 = 1e-7;

/// Relative tolerance on the Cardano invariants for a repeated root.
pub const DISCRIMINANT_TOL: f64 = 1e-12;

/// 0-based Voigt index of the tensor index pair (i, j).
const VOIGT: [[usize; 3]; 3] = [[0, 5, 4], [5, 1, 3], [4, 3, 2]];

/// Symmetric 3×3 Christoffel matrix and its gradient with respect to n.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChristoffelMatrix {
    pub g: [[f64; 3]; 3],
    /// `dg[i][k][l]` = ∂Γ_ik/∂n_l.
    pub dg: [[[f64; 3]; 3]; 3],
}

impl ChristoffelMatrix {
    pub fn new(model: &StiffnessModel, direction: &Direction) -> Self {
        let n = direction.cosines();
        let mut g = [[0.0; 3]; 3];
        let mut dg = [[[0.0; 3]; 3]; 3];
        for i in 0..3 {
            for k in i..3 {
                let mut gik = 0.0;
                let mut grad = [0.0; 3];
                for j in 0..3 {
                    for l in 0..3 {
                        gik += model.entry(VOIGT[i][j], VOIGT[k][l]) * n[j] * n[l];
                        // Γ_ik is a quadratic form in n; its gradient picks up both slots.
                        grad[l] += (model.entry(VOIGT[i][j], VOIGT[k][l])
                            + model.entry(VOIGT[i][l], VOIGT[k][j]))
                            * n[j];
                    }
                }
                g[i][k] = gik;
                g[k][i] = gik;
                dg[i][k] = grad;
                dg[k][i] = grad;
            }
        }
        ChristoffelMatrix { g, dg }
    }

    /// Invariants of det(λI − Γ) and their directional derivatives.
    pub fn characteristic(&self) -> CharacteristicCubic {
        let g = &self.g;
        let (g11, g22, g33) = (g[0][0], g[1][1], g[2][2]);
        let (g12, g13, g23) = (g[0][1], g[0][2], g[1][2]);

        let b = -(g11 + g22 + g33);
        let c = g11 * g33 + g22 * g33 + g11 * g22 - g12 * g12 - g13 * g13 - g23 * g23;
        let d = g23 * g23 * g11 + g13 * g13 * g22 + g12 * g12 * g33
            - g11 * g22 * g33
            - 2.0 * g12 * g13 * g23;

        let mut db = [0.0; 3];
        let mut dc = [0.0; 3];
        let mut dd = [0.0; 3];
        for l in 0..3 {
            let (d11, d22, d33) = (self.dg[0][0][l], self.dg[1][1][l], self.dg[2][2][l]);
            let (d12, d13, d23) = (self.dg[0][1][l], self.dg[0][2][l], self.dg[1][2][l]);

            db[l] = -(d11 + d22 + d33);
            dc[l] = d11 * g33 + g11 * d33 + d22 * g33 + g22 * d33 + d11 * g22 + g11 * d22
                - 2.0 * (g12 * d12 + g13 * d13 + g23 * d23);
            dd[l] = 2.0 * g23 * d23 * g11
                + g23 * g23 * d11
                + 2.0 * g13 * d13 * g22
                + g13 * g13 * d22
                + 2.0 * g12 * d12 * g33
                + g12 * g12 * d33
                - (d11 * g22 * g33 + g11 * d22 * g33 + g11 * g22 * d33)
                - 2.0 * (d12 * g13 * g23 + g12 * d13 * g23 + g12 * g13 * d23);
        }

        CharacteristicCubic {
            b,
            c,
            d,
            db,
            dc,
            dd,
        }
    }
}

/// Γ_ik by direct contraction; `christoffel_entry(m, n, i, k)` equals
/// `christoffel_entry(m, n, k, i)` for any symmetric stiffness.
pub fn christoffel_entry(model: &StiffnessModel, direction: &Direction, i: usize, k: usize) -> f64 {
    let n = direction.cosines();
    let mut sum = 0.0;
    for j in 0..3 {
        for l in 0..3 {
            sum += model.entry(VOIGT[i][j], VOIGT[k][l]) * n[j] * n[l];
        }
    }
    sum
}

/// λ³ + Bλ² + Cλ + D with ∂/∂n_l of each coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicCubic {
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub db: [f64; 3],
    pub dc: [f64; 3],
    pub dd: [f64; 3],
}

/// Coincidence pattern of the three phase velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootMultiplicity {
    /// All three branches coincide.
    Triple,
    /// Two branches coincide; `single` is the index of the remaining one.
    Pair { single: usize },
    Distinct,
}

impl RootMultiplicity {
    /// Classify from √λ values. Two or more coincident pairs count as a triple.
    pub fn classify(phase: &[Complex64; 3], eps: f64) -> Self {
        let close = |i: usize, j: usize| (phase[i] - phase[j]).norm() < eps;
        let pairs = [(0, 1, 2), (0, 2, 1), (1, 2, 0)];
        let mut single = None;
        let mut count = 0;
        for &(i, j, other) in &pairs {
            if close(i, j) {
                count += 1;
                single = Some(other);
            }
        }
        match (count, single) {
            (0, _) => RootMultiplicity::Distinct,
            (1, Some(single)) => RootMultiplicity::Pair { single },
            _ => RootMultiplicity::Triple,
        }
    }

    /// Classify from the cubic's invariants, independent of the stiffness scale.
    ///
    /// A triple root has Q ≈ 0 and P ≈ 0 against the mean root B/3; a double
    /// root has P² + Q³ ≈ 0 against |Q|³. Repeated roots come out of Cardano
    /// split well beyond `DEGENERACY_EPS` at physical magnitudes, so √λ is
    /// only compared when neither test fires.
    pub fn from_cubic(cubic: &CharacteristicCubic, phase: &[Complex64; 3]) -> Self {
        let (p, q) = cardano_invariants(cubic.b, cubic.c, cubic.d);
        let s = cubic.b.abs() / 3.0;
        if q.abs() <= DISCRIMINANT_TOL * s * s && p.abs() <= DISCRIMINANT_TOL * s * s * s {
            return RootMultiplicity::Triple;
        }
        if (p * p + q * q * q).abs() <= DISCRIMINANT_TOL * q.abs().powi(3) {
            return RootMultiplicity::Pair {
                single: odd_one_out(phase),
            };
        }
        Self::classify(phase, DEGENERACY_EPS)
    }

    /// Whether root `index` is a simple root of the cubic.
    pub fn is_simple(&self, index: usize) -> bool {
        match *self {
            RootMultiplicity::Distinct => true,
            RootMultiplicity::Pair { single } => single == index,
            RootMultiplicity::Triple => false,
        }
    }
}

/// Index of the root left over once the closest pair of √λ is removed.
fn odd_one_out(phase: &[Complex64; 3]) -> usize {
    let gap = |i: usize, j: usize| (phase[i] - phase[j]).norm();
    [(gap(1, 2), 0), (gap(0, 2), 1), (gap(0, 1), 2)]
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map_or(0, |(_, single)| single)
}

/// Eigen-solution for one direction: all three branches at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSolution {
    pub cubic: CharacteristicCubic,
    /// λ in solver order (qP, qS1, qS2).
    pub roots: [Complex64; 3],
    /// √λ.
    pub phase: [Complex64; 3],
    pub multiplicity: RootMultiplicity,
}

impl WaveSolution {
    pub fn solve(model: &StiffnessModel, direction: &Direction) -> Self {
        let cubic = ChristoffelMatrix::new(model, direction).characteristic();
        let roots = solve_monic_cubic(cubic.b, cubic.c, cubic.d);
        let phase = [roots[0].sqrt(), roots[1].sqrt(), roots[2].sqrt()];
        let multiplicity = RootMultiplicity::from_cubic(&cubic, &phase);
        WaveSolution {
            cubic,
            roots,
            phase,
            multiplicity,
        }
    }

    /// Phase velocity Re √λ [m/s].
    pub fn phase_velocity(&self, branch: Branch) -> f64 {
        self.phase[branch.index()].re
    }

    pub fn group_velocity(&self, branch: Branch) -> GroupVelocity {
        let idx = branch.index();
        let lam = self.roots[idx];
        let pv = self.phase[idx];
        let cb = &self.cubic;
        let b = Complex64::new(cb.b, 0.0);
        let c = Complex64::new(cb.c, 0.0);

        let component = |l: usize| -> f64 {
            let v = match self.multiplicity {
                RootMultiplicity::Triple => -cb.db[l] / (6.0 * pv),
                m if m.is_simple(idx) => {
                    -(lam * lam * cb.db[l] + lam * cb.dc[l] + cb.dd[l])
                        / (2.0 * pv * (3.0 * lam * lam + 2.0 * b * lam + c))
                }
                _ => -(2.0 * lam * cb.db[l] + cb.dc[l]) / (4.0 * pv * (3.0 * lam + b)),
            };
            v.re
        };

        GroupVelocity {
            vx: component(0),
            vy: component(1),
            vz: component(2),
        }
    }
}

/// Group velocity of one branch along one direction.
pub fn group_velocity(model: &StiffnessModel, direction: &Direction, branch: Branch) -> GroupVelocity {
    WaveSolution::solve(model, direction).group_velocity(branch)
}
