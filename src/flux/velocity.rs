//! Constant advection velocity.

use crate::io::{ParameterFileError, RuntimeParameters};

/// Advection velocity, constant in space and time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdvectionVelocity {
    /// x-component
    pub u: f64,
    /// y-component
    pub v: f64,
}

impl AdvectionVelocity {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Read `advection.u` and `advection.v`.
    pub fn from_parameters(params: &RuntimeParameters) -> Result<Self, ParameterFileError> {
        Ok(Self {
            u: params.get_f64("advection.u")?,
            v: params.get_f64("advection.v")?,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }

    /// Largest stable timestep for a CFL number `cfl` on cells of `dx × dy`.
    ///
    /// Returns `f64::INFINITY` for zero velocity.
    pub fn max_timestep(&self, cfl: f64, dx: f64, dy: f64) -> f64 {
        let rate = self.u.abs() / dx + self.v.abs() / dy;
        if rate == 0.0 { f64::INFINITY } else { cfl / rate }
    }
}
