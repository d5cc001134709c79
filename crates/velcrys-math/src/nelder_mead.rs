// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Nelder-Mead Simplex Minimizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Derivative-free Nelder-Mead minimization.
//!
//! Standard coefficients (reflection 1, expansion 2, contraction ½,
//! shrink ½). The initial simplex perturbs each coordinate of the seed by
//! 5 %, or sets it to 0.00025 when the coordinate is zero. The search stops
//! once both the simplex extent and the spread of function values fall below
//! their tolerances, or when the iteration/evaluation budget is spent.

const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct NelderMeadConfig {
    pub max_iterations: usize,
    pub max_evaluations: usize,
    /// Absolute tolerance on the simplex extent.
    pub x_tol: f64,
    /// Absolute tolerance on the spread of function values.
    pub f_tol: f64,
    /// Relative perturbation of non-zero seed coordinates.
    pub nonzero_step: f64,
    /// Absolute value used for zero seed coordinates.
    pub zero_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_evaluations: 1000,
            x_tol: 1e-7,
            f_tol: 1e-4,
            nonzero_step: 0.05,
            zero_step: 0.00025,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MinimizeResult {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
}

/// Minimize `f` starting from `x0`.
///
/// Never fails: if the budget runs out the best vertex is returned with
/// `converged = false`.
pub fn minimize<F>(mut f: F, x0: &[f64], cfg: &NelderMeadConfig) -> MinimizeResult
where
    F: FnMut(&[f64]) -> f64,
{
    let n = x0.len();
    let mut evaluations = 0usize;
    let mut eval = |x: &[f64], count: &mut usize| {
        *count += 1;
        f(x)
    };

    let mut sim: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    sim.push(x0.to_vec());
    for k in 0..n {
        let mut y = x0.to_vec();
        if y[k] != 0.0 {
            y[k] *= 1.0 + cfg.nonzero_step;
        } else {
            y[k] = cfg.zero_step;
        }
        sim.push(y);
    }
    let mut fsim: Vec<f64> = sim.iter().map(|x| eval(x, &mut evaluations)).collect();
    sort_simplex(&mut sim, &mut fsim);

    let mut iterations = 1usize;
    let mut converged = false;

    while evaluations < cfg.max_evaluations && iterations < cfg.max_iterations {
        if simplex_extent(&sim) <= cfg.x_tol && value_spread(&fsim) <= cfg.f_tol {
            converged = true;
            break;
        }

        let centroid = centroid(&sim[..n]);
        let worst = sim[n].clone();

        let xr = affine(&centroid, &worst, 1.0 + RHO, -RHO);
        let fxr = eval(&xr, &mut evaluations);

        if fxr < fsim[0] {
            let xe = affine(&centroid, &worst, 1.0 + RHO * CHI, -RHO * CHI);
            let fxe = eval(&xe, &mut evaluations);
            if fxe < fxr {
                sim[n] = xe;
                fsim[n] = fxe;
            } else {
                sim[n] = xr;
                fsim[n] = fxr;
            }
        } else if fxr < fsim[n - 1] {
            sim[n] = xr;
            fsim[n] = fxr;
        } else {
            let shrink = if fxr < fsim[n] {
                // Outside contraction
                let xc = affine(&centroid, &worst, 1.0 + PSI * RHO, -PSI * RHO);
                let fxc = eval(&xc, &mut evaluations);
                if fxc <= fxr {
                    sim[n] = xc;
                    fsim[n] = fxc;
                    false
                } else {
                    true
                }
            } else {
                // Inside contraction
                let xcc = affine(&centroid, &worst, 1.0 - PSI, PSI);
                let fxcc = eval(&xcc, &mut evaluations);
                if fxcc < fsim[n] {
                    sim[n] = xcc;
                    fsim[n] = fxcc;
                    false
                } else {
                    true
                }
            };

            if shrink {
                let best = sim[0].clone();
                for j in 1..=n {
                    sim[j] = affine(&best, &sim[j], 1.0 - SIGMA, SIGMA);
                    fsim[j] = eval(&sim[j], &mut evaluations);
                }
            }
        }

        iterations += 1;
        sort_simplex(&mut sim, &mut fsim);
    }

    if !converged && simplex_extent(&sim) <= cfg.x_tol && value_spread(&fsim) <= cfg.f_tol {
        converged = true;
    }

    MinimizeResult {
        x: sim[0].clone(),
        value: fsim[0],
        iterations,
        evaluations,
        converged,
    }
}

/// a·p + b·q, coordinate-wise.
fn affine(p: &[f64], q: &[f64], a: f64, b: f64) -> Vec<f64> {
    p.iter().zip(q.iter()).map(|(pi, qi)| a * pi + b * qi).collect()
}

fn centroid(points: &[Vec<f64>]) -> Vec<f64> {
    let dim = points[0].len();
    let mut c = vec![0.0; dim];
    for p in points {
        for (ci, pi) in c.iter_mut().zip(p.iter()) {
            *ci += pi;
        }
    }
    let inv = 1.0 / points.len() as f64;
    c.iter_mut().for_each(|ci| *ci *= inv);
    c
}

fn sort_simplex(sim: &mut Vec<Vec<f64>>, fsim: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..fsim.len()).collect();
    order.sort_by(|&a, &b| fsim[a].total_cmp(&fsim[b]));
    *sim = order.iter().map(|&i| sim[i].clone()).collect();
    *fsim = order.iter().map(|&i| fsim[i]).collect();
}

fn simplex_extent(sim: &[Vec<f64>]) -> f64 {
    let best = &sim[0];
    sim[1..]
        .iter()
        .flat_map(|v| v.iter().zip(best.iter()).map(|(a, b)| (a - b).abs()))
        .fold(0.0, f64::max)
}

fn value_spread(fsim: &[f64]) -> f64 {
    fsim[1..]
        .iter()
        .map(|v| (fsim[0] - v).abs())
        .fold(0.0, f64::max)
}
