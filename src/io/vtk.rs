//! VTK output for cell-centred fields.
//!
//! Writes VTI (XML ImageData) files for visualization in ParaView and other
//! VTK-compatible tools. A uniform grid maps directly onto ImageData: the
//! interior cells become VTK cells and each field is written as cell data.
//! Ghost cells are not written.
//!
//! # Example
//!
//! ```ignore
//! use ccfv::io::write_vti;
//!
//! write_vti("solution.vti", &[("phi", &phi), ("error", &err)], Some(time))?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mesh::{Grid2D, ScalarField};

/// Error type for VTK operations.
#[derive(Debug, Error)]
pub enum VtkError {
    /// I/O error during file operations.
    #[error("VTK I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to write.
    #[error("No fields given")]
    NoFields,

    /// Fields do not share one interior grid.
    #[error("Field '{name}' is on {actual}, expected {expected}")]
    GridMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// VTK XML writer helper.
struct VtkWriter<W: Write> {
    writer: BufWriter<W>,
    indent: usize,
}

impl<W: Write> VtkWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            indent: 0,
        }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\"?>")?;
        writeln!(
            self.writer,
            "<VTKFile type=\"ImageData\" version=\"0.1\" byte_order=\"LittleEndian\">"
        )?;
        self.indent += 1;
        Ok(())
    }

    fn write_footer(&mut self) -> std::io::Result<()> {
        self.indent -= 1;
        writeln!(self.writer, "</VTKFile>")?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> std::io::Result<()> {
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        for (key, value) in attrs {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        writeln!(self.writer, ">")?;
        self.indent += 1;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn write_data_array_f64(&mut self, name: &str, data: &[f64]) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" Name=\"{}\" format=\"ascii\">",
            name
        )?;

        self.indent += 1;
        self.write_indent()?;
        for (i, &v) in data.iter().enumerate() {
            write!(self.writer, "{:.10e}", v)?;
            if i + 1 < data.len() {
                write!(self.writer, " ")?;
            }
            // Line break every 6 values for readability
            if (i + 1) % 6 == 0 && i + 1 < data.len() {
                writeln!(self.writer)?;
                self.write_indent()?;
            }
        }
        writeln!(self.writer)?;
        self.indent -= 1;

        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        Ok(())
    }

    fn write_field_data(&mut self, name: &str, value: f64) -> std::io::Result<()> {
        self.start_element("FieldData", &[])?;
        self.write_indent()?;
        writeln!(
            self.writer,
            "<DataArray type=\"Float64\" Name=\"{}\" NumberOfTuples=\"1\" format=\"ascii\">",
            name
        )?;
        self.indent += 1;
        self.write_indent()?;
        writeln!(self.writer, "{:.10e}", value)?;
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</DataArray>")?;
        self.end_element("FieldData")?;
        Ok(())
    }
}

fn check_fields<'a>(fields: &[(&str, &'a ScalarField)]) -> Result<&'a Grid2D, VtkError> {
    let grid = fields
        .first()
        .map(|&(_, field)| field.grid())
        .ok_or(VtkError::NoFields)?;
    for (name, field) in fields {
        if !field.grid().same_interior(grid) {
            return Err(VtkError::GridMismatch {
                name: name.to_string(),
                expected: grid.describe(),
                actual: field.grid().describe(),
            });
        }
    }
    Ok(grid)
}

/// Write named fields on one grid as VTK ImageData cell data.
///
/// The first field is marked as the active scalar. `time`, if given, is
/// stored as field data named `TIME`.
pub fn write_vti(
    path: impl AsRef<Path>,
    fields: &[(&str, &ScalarField)],
    time: Option<f64>,
) -> Result<(), VtkError> {
    let grid = check_fields(fields)?;
    let file = File::create(path)?;
    let mut writer = VtkWriter::new(file);

    let extent = format!("0 {} 0 {} 0 0", grid.nx, grid.ny);
    let origin = format!("{:.10e} {:.10e} 0", grid.bounds.x_min, grid.bounds.y_min);
    let spacing = format!("{:.10e} {:.10e} 1", grid.dx, grid.dy);

    writer.write_header()?;
    writer.start_element(
        "ImageData",
        &[
            ("WholeExtent", &extent),
            ("Origin", &origin),
            ("Spacing", &spacing),
        ],
    )?;
    if let Some(t) = time {
        writer.write_field_data("TIME", t)?;
    }
    writer.start_element("Piece", &[("Extent", &extent)])?;

    writer.start_element("CellData", &[("Scalars", fields[0].0)])?;
    for (name, field) in fields {
        let values: Vec<f64> = field.interior_values().collect();
        writer.write_data_array_f64(name, &values)?;
    }
    writer.end_element("CellData")?;

    writer.end_element("Piece")?;
    writer.end_element("ImageData")?;
    writer.write_footer()?;

    Ok(())
}

/// Write one frame of a time series as `{stem}_{frame:04}.vti` next to `base_path`.
///
/// Returns the path written.
pub fn write_vti_series(
    base_path: impl AsRef<Path>,
    frame: usize,
    fields: &[(&str, &ScalarField)],
    time: f64,
) -> Result<PathBuf, VtkError> {
    let base = base_path.as_ref();
    let stem = base.file_stem().unwrap_or_default().to_string_lossy();
    let parent = base.parent().unwrap_or(Path::new("."));

    let filename = format!("{}_{:04}.vti", stem, frame);
    let path = parent.join(filename);
    write_vti(&path, fields, Some(time))?;

    Ok(path)
}
