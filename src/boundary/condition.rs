//! Boundary condition variants and per-edge sets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::Edges;

/// Errors from boundary condition configuration or ghost filling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// Periodic on one edge of an axis requires periodic on the other.
    #[error("Periodic boundary on the {axis} axis must be set on both edges")]
    UnpairedPeriodic { axis: &'static str },

    /// The ghost halo is wider than the interior, so mirrored reads would hit ghosts.
    #[error("Ghost width {ng} exceeds the {n} interior cells along {axis}")]
    HaloWiderThanInterior {
        axis: &'static str,
        n: usize,
        ng: usize,
    },

    /// Unrecognised boundary name.
    #[error("Unknown boundary condition '{0}'")]
    UnknownKind(String),
}

/// How the ghost cells beyond one edge are populated.
///
/// `Dirichlet` and `Neumann` impose their value at the boundary face by
/// mirroring interior cells across it, which is second-order accurate for
/// cell-centred data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Wrap around to the opposite edge.
    Periodic,
    /// Zero gradient: every ghost copies the edge cell.
    Outflow,
    /// Even mirror across the face.
    ReflectEven,
    /// Odd mirror across the face.
    ReflectOdd,
    /// Face value fixed.
    Dirichlet(f64),
    /// Face derivative along the axis (d/dx or d/dy, not the outward normal) fixed.
    Neumann(f64),
}

/// Which end of an axis an edge sits at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Lower,
    Upper,
}

/// Interior values a ghost may be derived from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GhostSources {
    /// Interior cell mirrored across the face
    pub mirror: f64,
    /// Interior cell adjacent to the face
    pub edge: f64,
    /// Interior cell at the same distance from the opposite face
    pub wrap: f64,
}

impl BoundaryCondition {
    /// Same kind with a zero value, used for error equations on coarse grids.
    pub fn homogeneous(self) -> Self {
        match self {
            Self::Dirichlet(_) => Self::Dirichlet(0.0),
            Self::Neumann(_) => Self::Neumann(0.0),
            other => other,
        }
    }

    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Periodic)
    }

    /// Ghost value `k` cells beyond the face (k = 0 touches the face).
    #[inline]
    pub(crate) fn ghost_value(self, side: Side, k: usize, spacing: f64, src: GhostSources) -> f64 {
        match self {
            Self::Periodic => src.wrap,
            Self::Outflow => src.edge,
            Self::ReflectEven => src.mirror,
            Self::ReflectOdd => -src.mirror,
            Self::Dirichlet(value) => 2.0 * value - src.mirror,
            Self::Neumann(gradient) => {
                let jump = (2 * k + 1) as f64 * spacing * gradient;
                match side {
                    Side::Lower => src.mirror - jump,
                    Side::Upper => src.mirror + jump,
                }
            }
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Periodic => write!(f, "periodic"),
            Self::Outflow => write!(f, "outflow"),
            Self::ReflectEven => write!(f, "reflect-even"),
            Self::ReflectOdd => write!(f, "reflect-odd"),
            Self::Dirichlet(v) => write!(f, "dirichlet({})", v),
            Self::Neumann(g) => write!(f, "neumann({})", g),
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = BoundaryError;

    /// Parse a boundary name. `dirichlet` and `neumann` take an optional
    /// value as `dirichlet:1.5`; the default is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => {
                let v = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| BoundaryError::UnknownKind(s.clone()))?;
                (name.trim().to_string(), v)
            }
            None => (s.clone(), 0.0),
        };

        match name.as_str() {
            "periodic" => Ok(Self::Periodic),
            "outflow" => Ok(Self::Outflow),
            "reflect-even" | "reflect" => Ok(Self::ReflectEven),
            "reflect-odd" => Ok(Self::ReflectOdd),
            "dirichlet" => Ok(Self::Dirichlet(value)),
            "neumann" => Ok(Self::Neumann(value)),
            _ => Err(BoundaryError::UnknownKind(s)),
        }
    }
}

/// Boundary conditions for all four edges of a grid.
///
/// # Example
///
/// ```
/// use ccfv::boundary::{BoundaryCondition, BoundaryConditions};
///
/// let bcs = BoundaryConditions::new(
///     BoundaryCondition::Periodic,
///     BoundaryCondition::Periodic,
///     BoundaryCondition::Dirichlet(1.0),
///     BoundaryCondition::Neumann(0.0),
/// )
/// .unwrap();
/// assert_eq!(bcs.homogeneous().edges().y_lo, BoundaryCondition::Dirichlet(0.0));
///
/// // A periodic edge without its partner is rejected
/// assert!(BoundaryConditions::new(
///     BoundaryCondition::Periodic,
///     BoundaryCondition::Outflow,
///     BoundaryCondition::Outflow,
///     BoundaryCondition::Outflow,
/// )
/// .is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConditions {
    edges: Edges<BoundaryCondition>,
}

impl BoundaryConditions {
    /// Validate and build from per-edge conditions.
    pub fn new(
        x_lo: BoundaryCondition,
        x_hi: BoundaryCondition,
        y_lo: BoundaryCondition,
        y_hi: BoundaryCondition,
    ) -> Result<Self, BoundaryError> {
        Self::from_edges(Edges::new(x_lo, x_hi, y_lo, y_hi))
    }

    pub fn from_edges(edges: Edges<BoundaryCondition>) -> Result<Self, BoundaryError> {
        if edges.x_lo.is_periodic() != edges.x_hi.is_periodic() {
            return Err(BoundaryError::UnpairedPeriodic { axis: "x" });
        }
        if edges.y_lo.is_periodic() != edges.y_hi.is_periodic() {
            return Err(BoundaryError::UnpairedPeriodic { axis: "y" });
        }
        Ok(Self { edges })
    }

    /// Periodic on every edge.
    pub fn periodic() -> Self {
        Self {
            edges: Edges::uniform(BoundaryCondition::Periodic),
        }
    }

    /// Homogeneous Dirichlet on every edge.
    pub fn dirichlet_zero() -> Self {
        Self {
            edges: Edges::uniform(BoundaryCondition::Dirichlet(0.0)),
        }
    }

    /// Zero-gradient outflow on every edge.
    pub fn outflow() -> Self {
        Self {
            edges: Edges::uniform(BoundaryCondition::Outflow),
        }
    }

    #[inline]
    pub fn edges(&self) -> &Edges<BoundaryCondition> {
        &self.edges
    }

    /// Zero-valued counterpart of every edge.
    pub fn homogeneous(&self) -> Self {
        Self {
            edges: self.edges.map(BoundaryCondition::homogeneous),
        }
    }

    /// Conditions for a cell-centred coefficient field that accompanies a
    /// solution with these conditions: periodic axes stay periodic, every
    /// other edge copies its interior neighbour.
    pub fn for_coefficients(&self) -> Self {
        Self {
            edges: self.edges.map(|bc| {
                if bc.is_periodic() {
                    BoundaryCondition::Periodic
                } else {
                    BoundaryCondition::Neumann(0.0)
                }
            }),
        }
    }

    /// Whether constants lie in the null space of a diffusion operator with
    /// these conditions (periodic or zero-flux on every edge).
    pub fn admits_constant_null_space(&self) -> bool {
        self.edges.iter().all(|bc| match *bc {
            BoundaryCondition::Periodic
            | BoundaryCondition::Outflow
            | BoundaryCondition::ReflectEven => true,
            BoundaryCondition::Neumann(gradient) => gradient == 0.0,
            _ => false,
        })
    }
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self::dirichlet_zero()
    }
}

impl fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.edges)
    }
}
