// ─────────────────────────────────────────────────────────────────────
// SCPN VelCrys — Spherical Surface Sweep
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Group-velocity surfaces over a θ × φ grid.
//!
//! Cells are independent, so the sweep runs on the rayon pool and the
//! results are scattered back into row-major `side × side` arrays. Each cell
//! is bit-identical to a standalone single-direction evaluation.

use crate::christoffel::group_velocity;
use crate::magnetic::MagneticSymmetry;
use crate::magnetoelastic::{FieldVelocity, MagneticAnalysis};
use ndarray::Array2;
use rayon::prelude::*;
use velcrys_types::error::VelcrysResult;
use velcrys_types::state::{Branch, Direction, GroupVelocity, SphericalGrid};
use velcrys_types::voigt::StiffnessModel;

/// Direction cosines and angles [deg] of every grid cell.
#[derive(Debug, Clone)]
pub struct GridAxes {
    pub nx: Array2<f64>,
    pub ny: Array2<f64>,
    pub nz: Array2<f64>,
    pub theta_deg: Array2<f64>,
    pub phi_deg: Array2<f64>,
}

impl GridAxes {
    fn new(grid: &SphericalGrid) -> Self {
        let side = grid.side;
        let n = |l: usize| {
            Array2::from_shape_fn((side, side), |(i, j)| grid.direction(i, j).cosines()[l])
        };
        GridAxes {
            nx: n(0),
            ny: n(1),
            nz: n(2),
            theta_deg: Array2::from_shape_fn((side, side), |(i, _)| grid.theta[i].to_degrees()),
            phi_deg: Array2::from_shape_fn((side, side), |(_, j)| grid.phi[j].to_degrees()),
        }
    }
}

/// Evaluate `f` on every cell in parallel, in row-major order.
fn sweep<T, F>(grid: &SphericalGrid, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Direction) -> T + Sync + Send,
{
    (0..grid.len())
        .into_par_iter()
        .map(|index| {
            let (i, j) = grid.cell(index);
            f(&grid.direction(i, j))
        })
        .collect()
}

fn scatter<T>(side: usize, values: &[T], pick: impl Fn(&T) -> f64) -> Array2<f64> {
    Array2::from_shape_fn((side, side), |(i, j)| pick(&values[i * side + j]))
}

/// Group velocity of one branch over the sphere.
#[derive(Debug, Clone)]
pub struct VelocitySurface {
    pub grid: SphericalGrid,
    pub branch: Branch,
    pub vx: Array2<f64>,
    pub vy: Array2<f64>,
    pub vz: Array2<f64>,
    /// |v| [m/s].
    pub magnitude: Array2<f64>,
    pub axes: GridAxes,
}

impl VelocitySurface {
    /// Points |v|·n for rendering the velocity surface as a radial plot.
    pub fn surface_points(&self) -> [Array2<f64>; 3] {
        [
            &self.magnitude * &self.axes.nx,
            &self.magnitude * &self.axes.ny,
            &self.magnitude * &self.axes.nz,
        ]
    }

    /// Cells with a non-finite velocity.
    pub fn singular_cells(&self) -> Vec<(usize, usize)> {
        self.magnitude
            .indexed_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(ij, _)| ij)
            .collect()
    }
}

/// Sweep ⌊√N⌋² directions and compute the group velocity of `branch`.
pub fn evaluate_velocity_surface(
    model: &StiffnessModel,
    n_points: usize,
    branch: Branch,
) -> VelcrysResult<VelocitySurface> {
    let grid = SphericalGrid::from_point_count(n_points)?;
    let side = grid.side;
    let values: Vec<GroupVelocity> = sweep(&grid, |n| group_velocity(model, n, branch));

    let magnitude = scatter(side, &values, GroupVelocity::magnitude);
    let singular = magnitude.iter().filter(|v| !v.is_finite()).count();
    log::debug!(
        "{} surface: {}x{} cells, {} singular",
        branch.label(),
        side,
        side,
        singular
    );

    Ok(VelocitySurface {
        vx: scatter(side, &values, |v| v.vx),
        vy: scatter(side, &values, |v| v.vy),
        vz: scatter(side, &values, |v| v.vz),
        magnitude,
        axes: GridAxes::new(&grid),
        grid,
        branch,
    })
}

/// Field-induced fractional change of |v| over the sphere.
#[derive(Debug, Clone)]
pub struct FieldSurface {
    pub grid: SphericalGrid,
    pub branch: Branch,
    pub magnitude: Array2<f64>,
    pub zero_field_magnitude: Array2<f64>,
    /// (|v| − |v0|) / |v0|.
    pub fractional_change: Array2<f64>,
    pub axes: GridAxes,
}

impl FieldSurface {
    /// Unit sphere deformed radially by (1 + scale·Δ|v|/|v0|).
    pub fn deformed_surface(&self, scale: f64) -> [Array2<f64>; 3] {
        let radius = self.fractional_change.mapv(|f| 1.0 + scale * f);
        [
            &radius * &self.axes.nx,
            &radius * &self.axes.ny,
            &radius * &self.axes.nz,
        ]
    }

    /// Largest |Δ|v|/|v0|| over the finite cells.
    pub fn max_abs_change(&self) -> f64 {
        self.fractional_change
            .iter()
            .filter(|f| f.is_finite())
            .fold(0.0_f64, |m, f| m.max(f.abs()))
    }
}

/// Sweep the grid through a resolved magnetic analysis.
pub fn evaluate_field_surface<S: MagneticSymmetry + Sync>(
    analysis: &MagneticAnalysis<S>,
    n_points: usize,
    branch: Branch,
) -> VelcrysResult<FieldSurface> {
    let grid = SphericalGrid::from_point_count(n_points)?;
    let side = grid.side;
    let values: Vec<FieldVelocity> = sweep(&grid, |n| analysis.evaluate(n, branch));

    let fractional_change = scatter(side, &values, |v| v.fractional_change);
    log::debug!(
        "{} field surface: {}x{} cells, non-finite={}",
        branch.label(),
        side,
        side,
        fractional_change.iter().filter(|f| !f.is_finite()).count()
    );

    Ok(FieldSurface {
        magnitude: scatter(side, &values, |v| v.corrected.magnitude()),
        zero_field_magnitude: scatter(side, &values, |v| v.zero_field.magnitude()),
        fractional_change,
        axes: GridAxes::new(&grid),
        grid,
        branch,
    })
}
