//! Solver state and convergence diagnostics.

use std::fmt;

/// Lifecycle of a [`VarCoeffMultigrid`](super::VarCoeffMultigrid).
///
/// ```text
/// Uninitialized -> ZeroedSolution -> RhsInstalled -> Solving -> Converged
///                                                            \-> NotConverged
/// ```
///
/// `init_zeros` and `init_rhs` may be called again from any state to start
/// a new solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    Uninitialized,
    ZeroedSolution,
    RhsInstalled,
    Solving,
    Converged,
    NotConverged,
}

impl SolverState {
    /// A solution estimate has been installed.
    pub fn has_solution(self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// A right-hand side has been installed.
    pub fn has_rhs(self) -> bool {
        matches!(
            self,
            Self::RhsInstalled | Self::Solving | Self::Converged | Self::NotConverged
        )
    }
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::ZeroedSolution => "zeroed solution",
            Self::RhsInstalled => "rhs installed",
            Self::Solving => "solving",
            Self::Converged => "converged",
            Self::NotConverged => "not converged",
        };
        write!(f, "{}", name)
    }
}

/// Measurements taken after one V-cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleRecord {
    /// 1-based cycle number within the solve
    pub cycle: usize,
    /// `||v_k - v_{k-1}|| / ||v_k||`
    pub solution_change: f64,
    /// `||f - L v_k|| / ||f||`
    pub residual: f64,
}

/// Outcome of [`VarCoeffMultigrid::solve`](super::VarCoeffMultigrid::solve).
///
/// Running out of cycles is reported here with `converged == false`, not
/// as an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveReport {
    pub converged: bool,
    /// V-cycles performed
    pub num_cycles: usize,
    /// Final value of the stopping measure
    pub relative_error: f64,
    /// Final relative residual
    pub residual_norm: f64,
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} after {} cycles (relative error {:.3e}, residual {:.3e})",
            if self.converged { "converged" } else { "not converged" },
            self.num_cycles,
            self.relative_error,
            self.residual_norm
        )
    }
}
