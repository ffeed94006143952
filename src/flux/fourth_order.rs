//! Fourth-order face-averaged fluxes for linear advection.
//!
//! For each direction the cell averages are first interpolated to face
//! averages on the left (lower) face of every cell:
//!
//! ```text
//! <a>_{i-1/2} = 7/12 (a_{i-1} + a_i) - 1/12 (a_{i-2} + a_{i+1})
//! ```
//!
//! A face average is converted to the face-centre value by removing the
//! transverse second difference, the flux is evaluated pointwise there, and
//! the result is converted back to a face average using the transverse
//! second difference of the naive flux `u <a>`:
//!
//! ```text
//! a_cc   = <a> - 1/24 Δ⊥<a>
//! F_cc   = u a_cc
//! <F>    = F_cc + 1/24 Δ⊥(u <a>)
//! ```
//!
//! The naive product in the last step is only needed to second order.
//!
//! With constant velocity there is exactly one upwind state per face, so no
//! Riemann problem arises. Interpolation runs on the interior extended by one
//! face along the flux direction and one cell across it; the corrections then
//! need only the faces themselves. A ghost width of two is sufficient.

use super::{AdvectionVelocity, FluxError};
use crate::io::RuntimeParameters;
use crate::mesh::{GridError, ScalarField, StencilView};
use crate::types::Buffer;

/// Face-averaged fluxes on the left faces of each cell.
///
/// `x[(i, j)]` is the flux through the face between cells `i - 1` and `i`;
/// `y[(i, j)]` is the flux through the face between rows `j - 1` and `j`.
/// Both are valid on every interior face plus the upper boundary face.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceFluxes {
    pub x: ScalarField,
    pub y: ScalarField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn shift(self, d: isize) -> (isize, isize) {
        match self {
            Axis::X => (d, 0),
            Axis::Y => (0, d),
        }
    }

    fn transverse(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Where face averages are interpolated.
    fn interpolation_buffer(self) -> Buffer {
        match self {
            Axis::X => Buffer::new(0, 1, 1, 1),
            Axis::Y => Buffer::new(1, 1, 0, 1),
        }
    }

    /// Where the final fluxes are valid.
    fn face_buffer(self) -> Buffer {
        match self {
            Axis::X => Buffer::new(0, 1, 0, 0),
            Axis::Y => Buffer::new(0, 0, 0, 1),
        }
    }
}

fn shifted(
    field: &ScalarField,
    axis: Axis,
    d: isize,
    buf: Buffer,
) -> Result<StencilView<'_>, GridError> {
    let (sx, sy) = axis.shift(d);
    field.view(sx, sy, buf)
}

/// Fourth-order face averages of `a` on the faces normal to `axis`.
fn face_average(a: &ScalarField, axis: Axis) -> Result<ScalarField, GridError> {
    let buf = axis.interpolation_buffer();
    let m2 = shifted(a, axis, -2, buf)?;
    let m1 = shifted(a, axis, -1, buf)?;
    let c = shifted(a, axis, 0, buf)?;
    let p1 = shifted(a, axis, 1, buf)?;

    let mut face = a.grid().scratch_array();
    for (i, j) in c.region().iter() {
        face[(i, j)] = 7.0 / 12.0 * (m1.at(i, j) + c.at(i, j))
            - 1.0 / 12.0 * (m2.at(i, j) + p1.at(i, j));
    }
    Ok(face)
}

/// Flux through the faces normal to `axis` for advection speed `vel`.
fn axis_flux(a: &ScalarField, axis: Axis, vel: f64) -> Result<ScalarField, GridError> {
    let face_avg = face_average(a, axis)?;

    let mut naive = face_avg.clone();
    naive.scale(vel);

    let t = axis.transverse();
    let buf = axis.face_buffer();
    let avg_m = shifted(&face_avg, t, -1, buf)?;
    let avg_c = shifted(&face_avg, t, 0, buf)?;
    let avg_p = shifted(&face_avg, t, 1, buf)?;
    let naive_m = shifted(&naive, t, -1, buf)?;
    let naive_c = shifted(&naive, t, 0, buf)?;
    let naive_p = shifted(&naive, t, 1, buf)?;

    let mut flux = a.grid().scratch_array();
    for (i, j) in avg_c.region().iter() {
        let face_cc = avg_c.at(i, j)
            - (avg_m.at(i, j) - 2.0 * avg_c.at(i, j) + avg_p.at(i, j)) / 24.0;
        let flux_cc = vel * face_cc;
        flux[(i, j)] = flux_cc
            + (naive_m.at(i, j) - 2.0 * naive_c.at(i, j) + naive_p.at(i, j)) / 24.0;
    }
    Ok(flux)
}

/// Fourth-order face-averaged advective fluxes of cell-averaged `field`.
///
/// The ghost cells of `field` must already be filled, at least two deep.
/// `field` is not modified.
///
/// # Errors
///
/// - [`FluxError::NonFiniteVelocity`] if either velocity component is NaN or infinite
/// - [`FluxError::Grid`] wrapping [`GridError::InsufficientHalo`] if the
///   ghost width is below two
///
/// # Example
///
/// ```
/// use ccfv::boundary::BoundaryConditions;
/// use ccfv::flux::{compute_fluxes, AdvectionVelocity};
/// use ccfv::mesh::{Grid2D, ScalarField};
///
/// let grid = Grid2D::unit_square(16, 16, 2).unwrap();
/// let mut a = ScalarField::from_fn(grid, |x, _| 1.0 + x);
/// BoundaryConditions::periodic().fill(&mut a).unwrap();
///
/// let fluxes = compute_fluxes(&a, AdvectionVelocity::new(0.0, 0.0)).unwrap();
/// assert!(fluxes.x.data().iter().all(|&f| f == 0.0));
/// ```
pub fn compute_fluxes(
    field: &ScalarField,
    velocity: AdvectionVelocity,
) -> Result<FaceFluxes, FluxError> {
    if !velocity.is_finite() {
        return Err(FluxError::NonFiniteVelocity {
            u: velocity.u,
            v: velocity.v,
        });
    }

    Ok(FaceFluxes {
        x: axis_flux(field, Axis::X, velocity.u)?,
        y: axis_flux(field, Axis::Y, velocity.v)?,
    })
}

/// [`compute_fluxes`] with the velocity read from runtime parameters.
pub fn compute_fluxes_from_parameters(
    field: &ScalarField,
    params: &RuntimeParameters,
) -> Result<FaceFluxes, FluxError> {
    let velocity = AdvectionVelocity::from_parameters(params)?;
    compute_fluxes(field, velocity)
}
