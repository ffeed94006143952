//! Solution files for later comparison.
//!
//! # File Format
//!
//! ```text
//! # name: phi
//! # nx: 4
//! # ny: 4
//! # ng: 1
//! # xmin: 0
//! # xmax: 1
//! # ymin: 0
//! # ymax: 1
//! # columns: x y value
//! 1.25e-1 1.25e-1 -3.1e-3
//! ...
//! ```
//!
//! One line per interior cell, `x` fastest. Ghost cells are not stored;
//! a field read back has zero ghosts.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::analysis::{l2_norm, max_norm};
use crate::mesh::{Grid2D, GridError, ScalarField};
use crate::types::Bounds2D;

/// Error type for solution files.
#[derive(Debug, Error)]
pub enum SolutionFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Required header key absent
    #[error("Missing header entry: {0}")]
    MissingHeader(&'static str),

    /// Header describes an invalid grid
    #[error("Invalid grid in header: {0}")]
    Grid(#[from] GridError),

    /// Number of data lines does not match the header
    #[error("Expected {expected} values, found {found}")]
    WrongCount { expected: usize, found: usize },

    /// Two solutions live on different grids
    #[error("Grid mismatch: {expected} vs {actual}")]
    GridMismatch { expected: String, actual: String },
}

/// A solution read back from disk.
#[derive(Clone, Debug)]
pub struct StoredSolution {
    pub name: String,
    pub field: ScalarField,
}

/// Differences between two solutions on the same grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolutionDifference {
    /// Largest pointwise difference
    pub max_abs: f64,
    /// Cell-area weighted L2 norm of the difference
    pub l2: f64,
}

impl SolutionDifference {
    /// Whether the largest difference is within `tol`.
    pub fn within(&self, tol: f64) -> bool {
        self.max_abs <= tol
    }
}

/// Write the interior of `field` with grid metadata.
pub fn write_solution(
    path: impl AsRef<Path>,
    name: &str,
    field: &ScalarField,
) -> Result<(), SolutionFileError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    let g = field.grid();

    writeln!(w, "# name: {}", name)?;
    writeln!(w, "# nx: {}", g.nx)?;
    writeln!(w, "# ny: {}", g.ny)?;
    writeln!(w, "# ng: {}", g.ng)?;
    writeln!(w, "# xmin: {:e}", g.bounds.x_min)?;
    writeln!(w, "# xmax: {:e}", g.bounds.x_max)?;
    writeln!(w, "# ymin: {:e}", g.bounds.y_min)?;
    writeln!(w, "# ymax: {:e}", g.bounds.y_max)?;
    writeln!(w, "# columns: x y value")?;

    for (i, j) in g.interior().iter() {
        writeln!(w, "{:e} {:e} {:e}", g.x(i), g.y(j), field[(i, j)])?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Default)]
struct Header {
    name: Option<String>,
    nx: Option<usize>,
    ny: Option<usize>,
    ng: Option<usize>,
    xmin: Option<f64>,
    xmax: Option<f64>,
    ymin: Option<f64>,
    ymax: Option<f64>,
}

impl Header {
    fn grid(&self) -> Result<Grid2D, SolutionFileError> {
        let nx = self.nx.ok_or(SolutionFileError::MissingHeader("nx"))?;
        let ny = self.ny.ok_or(SolutionFileError::MissingHeader("ny"))?;
        let ng = self.ng.ok_or(SolutionFileError::MissingHeader("ng"))?;
        let bounds = Bounds2D {
            x_min: self.xmin.ok_or(SolutionFileError::MissingHeader("xmin"))?,
            x_max: self.xmax.ok_or(SolutionFileError::MissingHeader("xmax"))?,
            y_min: self.ymin.ok_or(SolutionFileError::MissingHeader("ymin"))?,
            y_max: self.ymax.ok_or(SolutionFileError::MissingHeader("ymax"))?,
        };
        Ok(Grid2D::new(nx, ny, ng, bounds)?)
    }
}

fn parse_value<T: std::str::FromStr>(
    s: &str,
    line: usize,
    what: &str,
) -> Result<T, SolutionFileError> {
    s.trim().parse::<T>().map_err(|_| SolutionFileError::ParseError {
        line,
        message: format!("Invalid {}", what),
    })
}

/// Read a solution written by [`write_solution`].
pub fn read_solution(path: impl AsRef<Path>) -> Result<StoredSolution, SolutionFileError> {
    let reader = BufReader::new(File::open(path)?);
    let mut header = Header::default();
    let mut values = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        let ln = line_num + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let Some((key, value)) = comment.split_once(':') else {
                continue;
            };
            match key.trim() {
                "name" => header.name = Some(value.trim().to_string()),
                "nx" => header.nx = Some(parse_value(value, ln, "nx")?),
                "ny" => header.ny = Some(parse_value(value, ln, "ny")?),
                "ng" => header.ng = Some(parse_value(value, ln, "ng")?),
                "xmin" => header.xmin = Some(parse_value(value, ln, "xmin")?),
                "xmax" => header.xmax = Some(parse_value(value, ln, "xmax")?),
                "ymin" => header.ymin = Some(parse_value(value, ln, "ymin")?),
                "ymax" => header.ymax = Some(parse_value(value, ln, "ymax")?),
                _ => {}
            }
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(SolutionFileError::ParseError {
                line: ln,
                message: "Expected: x y value".into(),
            });
        }
        values.push(parse_value::<f64>(parts[2], ln, "value")?);
    }

    let grid = header.grid()?;
    let expected = grid.nx * grid.ny;
    if values.len() != expected {
        return Err(SolutionFileError::WrongCount {
            expected,
            found: values.len(),
        });
    }

    let mut field = grid.scratch_array();
    for ((i, j), v) in grid.interior().iter().zip(values) {
        field[(i, j)] = v;
    }

    Ok(StoredSolution {
        name: header.name.unwrap_or_default(),
        field,
    })
}

/// Compare the interiors of two solutions.
///
/// Ghost widths may differ; the interior cells and bounds must match.
pub fn compare_solutions(
    a: &ScalarField,
    b: &ScalarField,
) -> Result<SolutionDifference, SolutionFileError> {
    if !a.grid().same_interior(b.grid()) {
        return Err(SolutionFileError::GridMismatch {
            expected: a.grid().describe(),
            actual: b.grid().describe(),
        });
    }

    let mut b_on_a = a.grid().scratch_array();
    b_on_a.copy_interior_from(b)?;
    let mut diff = a.clone();
    diff.axpy(-1.0, &b_on_a)?;

    Ok(SolutionDifference {
        max_abs: max_norm(&diff),
        l2: l2_norm(&diff),
    })
}
