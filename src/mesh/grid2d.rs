//! Uniform 2D Cartesian grid with a ghost-cell halo.
//!
//! Storage indices run over the whole array including ghosts:
//!
//! ```text
//!   0 .. ng-1        ilo .. ihi        ihi+1 .. qx-1
//!   [ ghost ]  |     [ interior ]    |  [ ghost ]
//! ```
//!
//! with `ilo = ng`, `ihi = ng + nx - 1` and `qx = nx + 2 ng` (same in y).
//! Cell `i` spans `[x_face(i), x_face(i + 1)]` and its centre is `x(i)`.
//! Face-centred quantities live on the left (lower) face of their cell.

use super::{GridError, ScalarField};
use crate::types::{Bounds2D, Buffer};

/// Immutable geometry of a cell-centred grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid2D {
    /// Interior cells in x
    pub nx: usize,
    /// Interior cells in y
    pub ny: usize,
    /// Ghost cells on each edge
    pub ng: usize,
    /// Physical extent of the interior
    pub bounds: Bounds2D,
    /// Cell width
    pub dx: f64,
    /// Cell height
    pub dy: f64,
    /// First interior storage index in x
    pub ilo: usize,
    /// Last interior storage index in x
    pub ihi: usize,
    /// First interior storage index in y
    pub jlo: usize,
    /// Last interior storage index in y
    pub jhi: usize,
    /// Total storage extent in x (nx + 2 ng)
    pub qx: usize,
    /// Total storage extent in y (ny + 2 ng)
    pub qy: usize,
}

impl Grid2D {
    /// Create a grid of `nx × ny` interior cells with `ng` ghost cells.
    pub fn new(nx: usize, ny: usize, ng: usize, bounds: Bounds2D) -> Result<Self, GridError> {
        if nx == 0 || ny == 0 || ng == 0 {
            return Err(GridError::InvalidDimensions { nx, ny, ng });
        }
        if !bounds.is_valid() {
            return Err(GridError::InvalidBounds(bounds));
        }
        let (dx, dy) = bounds.spacing(nx, ny);

        Ok(Self {
            nx,
            ny,
            ng,
            bounds,
            dx,
            dy,
            ilo: ng,
            ihi: ng + nx - 1,
            jlo: ng,
            jhi: ng + ny - 1,
            qx: nx + 2 * ng,
            qy: ny + 2 * ng,
        })
    }

    /// Grid on the unit square.
    pub fn unit_square(nx: usize, ny: usize, ng: usize) -> Result<Self, GridError> {
        Self::new(nx, ny, ng, Bounds2D::unit_square())
    }

    /// Cell-centre x-coordinate of storage column `i` (ghosts included).
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        self.bounds.x_min + (i as f64 - self.ng as f64 + 0.5) * self.dx
    }

    /// Cell-centre y-coordinate of storage row `j` (ghosts included).
    #[inline]
    pub fn y(&self, j: usize) -> f64 {
        self.bounds.y_min + (j as f64 - self.ng as f64 + 0.5) * self.dy
    }

    /// x-coordinate of the left face of column `i`.
    #[inline]
    pub fn x_face(&self, i: usize) -> f64 {
        self.bounds.x_min + (i as f64 - self.ng as f64) * self.dx
    }

    /// y-coordinate of the lower face of row `j`.
    #[inline]
    pub fn y_face(&self, j: usize) -> f64 {
        self.bounds.y_min + (j as f64 - self.ng as f64) * self.dy
    }

    /// Cell area.
    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Total number of stored values.
    #[inline]
    pub fn n_storage(&self) -> usize {
        self.qx * self.qy
    }

    /// Linear storage offset of `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.qx && j < self.qy, "({}, {}) outside storage", i, j);
        j * self.qx + i
    }

    /// A zero-initialized field on this grid.
    pub fn scratch_array(&self) -> ScalarField {
        ScalarField::zeros(*self)
    }

    /// Interior cells.
    pub fn interior(&self) -> Region {
        Region {
            i_lo: self.ilo,
            i_hi: self.ihi,
            j_lo: self.jlo,
            j_hi: self.jhi,
        }
    }

    /// Interior extended by `buf`, checked against the ghost width.
    pub fn region(&self, buf: impl Into<Buffer>) -> Result<Region, GridError> {
        let buf = buf.into();
        check_reach("x", buf.x_lo().max(buf.x_hi()), self.ng)?;
        check_reach("y", buf.y_lo().max(buf.y_hi()), self.ng)?;

        Ok(Region {
            i_lo: self.ilo - buf.x_lo(),
            i_hi: self.ihi + buf.x_hi(),
            j_lo: self.jlo - buf.y_lo(),
            j_hi: self.jhi + buf.y_hi(),
        })
    }

    /// Same domain and ghost width, `factor` times fewer cells.
    pub fn coarse_like(&self, factor: usize) -> Result<Self, GridError> {
        for n in [self.nx, self.ny] {
            if factor == 0 || n % factor != 0 || n / factor == 0 {
                return Err(GridError::IncompatibleCoarsening { n, factor });
            }
        }
        Self::new(self.nx / factor, self.ny / factor, self.ng, self.bounds)
    }

    /// Same domain and ghost width, `factor` times more cells.
    pub fn fine_like(&self, factor: usize) -> Result<Self, GridError> {
        Self::new(self.nx * factor, self.ny * factor, self.ng, self.bounds)
    }

    /// Whether two grids describe the same interior cells.
    pub fn same_interior(&self, other: &Grid2D) -> bool {
        self.nx == other.nx && self.ny == other.ny && self.bounds == other.bounds
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        format!("{}x{} (ng={}) on {}", self.nx, self.ny, self.ng, self.bounds)
    }
}

fn check_reach(axis: &'static str, required: usize, available: usize) -> Result<(), GridError> {
    if required > available {
        return Err(GridError::InsufficientHalo {
            axis,
            required,
            available,
        });
    }
    Ok(())
}

/// Inclusive rectangle of storage indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub i_lo: usize,
    pub i_hi: usize,
    pub j_lo: usize,
    pub j_hi: usize,
}

impl Region {
    /// Number of cells in the region.
    #[inline]
    pub fn n_cells(&self) -> usize {
        (self.i_hi + 1 - self.i_lo) * (self.j_hi + 1 - self.j_lo)
    }

    /// Whether `(i, j)` lies inside.
    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        (self.i_lo..=self.i_hi).contains(&i) && (self.j_lo..=self.j_hi).contains(&j)
    }

    /// Iterate `(i, j)` with `i` fastest.
    pub fn iter(self) -> impl Iterator<Item = (usize, usize)> {
        let Region {
            i_lo,
            i_hi,
            j_lo,
            j_hi,
        } = self;
        (j_lo..=j_hi).flat_map(move |j| (i_lo..=i_hi).map(move |i| (i, j)))
    }
}
