//! Multigrid solver configuration.

use std::fmt;
use std::str::FromStr;

use super::MultigridError;
use crate::io::{ParameterFileError, RuntimeParameters};

/// Relaxation scheme used on every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Smoother {
    /// Red-black Gauss-Seidel. Each colour depends only on the other, so a
    /// colour is updated in one data-parallel pass.
    #[default]
    RedBlackGaussSeidel,
    /// Weighted Jacobi (parallel-friendly, but weaker than Gauss-Seidel).
    WeightedJacobi,
}

impl FromStr for Smoother {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rbgs" | "redblack" | "red_black" | "gauss_seidel" => Ok(Self::RedBlackGaussSeidel),
            "jacobi" | "wj" | "weighted_jacobi" => Ok(Self::WeightedJacobi),
            other => Err(format!("unknown smoother '{}'", other)),
        }
    }
}

impl fmt::Display for Smoother {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedBlackGaussSeidel => write!(f, "rbgs"),
            Self::WeightedJacobi => write!(f, "jacobi"),
        }
    }
}

/// Quantity compared against `rtol` after each V-cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoppingCriterion {
    /// `||v_k - v_{k-1}|| / ||v_k||`
    #[default]
    SolutionChange,
    /// `||f - L v_k|| / ||f||`
    RelativeResidual,
}

impl FromStr for StoppingCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solution" | "solution_change" => Ok(Self::SolutionChange),
            "residual" | "relative_residual" => Ok(Self::RelativeResidual),
            other => Err(format!("unknown stopping criterion '{}'", other)),
        }
    }
}

/// Settings for [`VarCoeffMultigrid`](super::VarCoeffMultigrid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultigridConfig {
    /// Smoothing sweeps before restricting.
    pub pre_smooth: usize,
    /// Smoothing sweeps after prolongating.
    pub post_smooth: usize,
    /// Sweeps on the coarsest level (acts as the coarse solve).
    pub bottom_smooth: usize,
    /// V-cycles allowed per solve.
    pub max_cycles: usize,
    /// Smoother selection.
    pub smoother: Smoother,
    /// Weighted Jacobi relaxation parameter (0 < omega <= 1).
    pub jacobi_omega: f64,
    /// Convergence measure.
    pub criterion: StoppingCriterion,
    /// Relative size of the right-hand side mean tolerated when the
    /// operator is singular.
    pub compatibility_tol: f64,
    /// Report every cycle at info level instead of debug.
    pub verbose: bool,
}

impl Default for MultigridConfig {
    fn default() -> Self {
        Self {
            pre_smooth: 10,
            post_smooth: 10,
            bottom_smooth: 50,
            max_cycles: 100,
            smoother: Smoother::RedBlackGaussSeidel,
            jacobi_omega: 2.0 / 3.0,
            criterion: StoppingCriterion::SolutionChange,
            compatibility_tol: 1e-10,
            verbose: false,
        }
    }
}

impl MultigridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same number of sweeps before and after the coarse correction.
    pub fn with_smoothing(mut self, sweeps: usize) -> Self {
        self.pre_smooth = sweeps;
        self.post_smooth = sweeps;
        self
    }

    pub fn with_pre_smooth(mut self, sweeps: usize) -> Self {
        self.pre_smooth = sweeps;
        self
    }

    pub fn with_post_smooth(mut self, sweeps: usize) -> Self {
        self.post_smooth = sweeps;
        self
    }

    pub fn with_bottom_smooth(mut self, sweeps: usize) -> Self {
        self.bottom_smooth = sweeps;
        self
    }

    pub fn with_max_cycles(mut self, cycles: usize) -> Self {
        self.max_cycles = cycles;
        self
    }

    pub fn with_smoother(mut self, smoother: Smoother) -> Self {
        self.smoother = smoother;
        self
    }

    pub fn with_jacobi_omega(mut self, omega: f64) -> Self {
        self.jacobi_omega = omega;
        self
    }

    pub fn with_criterion(mut self, criterion: StoppingCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_compatibility_tol(mut self, tol: f64) -> Self {
        self.compatibility_tol = tol;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reject settings under which a V-cycle cannot change the solution.
    pub fn validate(&self) -> Result<(), MultigridError> {
        if self.pre_smooth + self.post_smooth == 0 {
            return Err(MultigridError::InvalidConfig {
                setting: "pre_smooth + post_smooth",
                reason: "at least one smoothing sweep is required",
            });
        }
        if self.bottom_smooth == 0 {
            return Err(MultigridError::InvalidConfig {
                setting: "bottom_smooth",
                reason: "the coarsest level needs at least one sweep",
            });
        }
        if !(self.jacobi_omega > 0.0 && self.jacobi_omega <= 1.0) {
            return Err(MultigridError::InvalidConfig {
                setting: "jacobi_omega",
                reason: "must lie in (0, 1]",
            });
        }
        if !(self.compatibility_tol.is_finite() && self.compatibility_tol >= 0.0) {
            return Err(MultigridError::InvalidConfig {
                setting: "compatibility_tol",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Overlay `multigrid.*` keys onto the defaults.
    ///
    /// Recognised keys: `pre_smooth`, `post_smooth`, `bottom_smooth`,
    /// `max_cycles`, `smoother`, `jacobi_omega`, `criterion`,
    /// `compatibility_tol`, `verbose`.
    pub fn from_parameters(params: &RuntimeParameters) -> Result<Self, ParameterFileError> {
        let d = Self::default();
        let verbose = if params.contains("multigrid.verbose") {
            params.get_bool("multigrid.verbose")?
        } else {
            d.verbose
        };

        Ok(Self {
            pre_smooth: params.get_or("multigrid.pre_smooth", d.pre_smooth)?,
            post_smooth: params.get_or("multigrid.post_smooth", d.post_smooth)?,
            bottom_smooth: params.get_or("multigrid.bottom_smooth", d.bottom_smooth)?,
            max_cycles: params.get_or("multigrid.max_cycles", d.max_cycles)?,
            smoother: params.get_or("multigrid.smoother", d.smoother)?,
            jacobi_omega: params.get_or("multigrid.jacobi_omega", d.jacobi_omega)?,
            criterion: params.get_or("multigrid.criterion", d.criterion)?,
            compatibility_tol: params.get_or("multigrid.compatibility_tol", d.compatibility_tol)?,
            verbose,
        })
    }
}
