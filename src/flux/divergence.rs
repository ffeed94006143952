//! Conservative flux differencing.

use super::FaceFluxes;
use crate::mesh::{GridError, ScalarField};
use crate::types::Buffer;

/// Rate of change of cell averages from face-averaged fluxes:
///
/// ```text
/// da/dt = -(Fx[i+1] - Fx[i]) / dx - (Fy[j+1] - Fy[j]) / dy
/// ```
///
/// Interior cells only; ghosts of the result are zero.
pub fn flux_divergence(fluxes: &FaceFluxes) -> Result<ScalarField, GridError> {
    let grid = *fluxes.x.grid();
    if *fluxes.y.grid() != grid {
        return Err(GridError::shape_mismatch(
            grid.describe(),
            fluxes.y.grid().describe(),
        ));
    }

    let fx_r = fluxes.x.view(1, 0, Buffer::ZERO)?;
    let fy_t = fluxes.y.view(0, 1, Buffer::ZERO)?;

    let mut rate = grid.scratch_array();
    for (i, j) in grid.interior().iter() {
        rate[(i, j)] = -(fx_r.at(i, j) - fluxes.x[(i, j)]) / grid.dx
            - (fy_t.at(i, j) - fluxes.y[(i, j)]) / grid.dy;
    }
    Ok(rate)
}
