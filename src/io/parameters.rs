//! Runtime parameter files.
//!
//! # File Format
//!
//! ```text
//! # advection test
//! [advection]
//! u = 1.0
//! v = 0.5      ; trailing comments are allowed
//!
//! [mesh]
//! nx = 64
//! xlboundary = periodic
//! ```
//!
//! Keys are addressed as `section.key`. Keys before the first section
//! header have no prefix. Later definitions override earlier ones.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Error type for parameter files.
#[derive(Debug, Error)]
pub enum ParameterFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed line
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Requested key not present
    #[error("Missing parameter: {0}")]
    Missing(String),

    /// Value present but not convertible
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Named scalar parameters read by value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeParameters {
    values: BTreeMap<String, String>,
}

impl RuntimeParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a parameter file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParameterFileError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse parameter text.
    pub fn parse(content: &str) -> Result<Self, ParameterFileError> {
        let mut params = Self::new();
        let mut section = String::new();

        for (line_num, raw) in content.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').ok_or_else(|| ParameterFileError::ParseError {
                    line: line_num + 1,
                    message: "Unterminated section header".into(),
                })?;
                section = name.trim().to_string();
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ParameterFileError::ParseError {
                line: line_num + 1,
                message: "Expected: key = value".into(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ParameterFileError::ParseError {
                    line: line_num + 1,
                    message: "Empty key".into(),
                });
            }
            params.set(&qualify(&section, key), value.trim());
        }

        Ok(params)
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw string value.
    pub fn get_str(&self, key: &str) -> Result<&str, ParameterFileError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ParameterFileError::Missing(key.to_string()))
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, ParameterFileError> {
        self.get_parsed(key)
    }

    pub fn get_usize(&self, key: &str) -> Result<usize, ParameterFileError> {
        self.get_parsed(key)
    }

    /// Accepts `true/false`, `yes/no`, `on/off` and `1/0`.
    pub fn get_bool(&self, key: &str) -> Result<bool, ParameterFileError> {
        let raw = self.get_str(key)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ParameterFileError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Parse with [`FromStr`], or fall back to `default` when missing.
    pub fn get_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ParameterFileError> {
        if self.contains(key) {
            self.get_parsed(key)
        } else {
            Ok(default)
        }
    }

    /// Parse any [`FromStr`] value.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<T, ParameterFileError> {
        let raw = self.get_str(key)?;
        raw.parse().map_err(|_| ParameterFileError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn qualify(section: &str, key: &str) -> String {
    if section.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;

    const SAMPLE: &str = "\
# driver settings
verbose = yes

[mesh]
nx = 32   ; cells
xlboundary = periodic
ylboundary = dirichlet:1.5

[advection]
u = 1.0
v = -0.5
";

    #[test]
    fn test_parse_sections_and_types() {
        let p = RuntimeParameters::parse(SAMPLE).unwrap();
        assert!(p.get_bool("verbose").unwrap());
        assert_eq!(p.get_usize("mesh.nx").unwrap(), 32);
        assert_eq!(p.get_f64("advection.v").unwrap(), -0.5);
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn test_boundary_names_parse() {
        let p = RuntimeParameters::parse(SAMPLE).unwrap();
        let bc: BoundaryCondition = p.get_parsed("mesh.ylboundary").unwrap();
        assert_eq!(bc, BoundaryCondition::Dirichlet(1.5));
    }

    #[test]
    fn test_errors() {
        let p = RuntimeParameters::parse(SAMPLE).unwrap();
        assert!(matches!(p.get_f64("mesh.ny"), Err(ParameterFileError::Missing(_))));
        assert!(matches!(
            p.get_usize("mesh.xlboundary"),
            Err(ParameterFileError::InvalidValue { .. })
        ));
        assert_eq!(p.get_or("mesh.ny", 16usize).unwrap(), 16);

        let err = RuntimeParameters::parse("[mesh\nnx = 4\n").unwrap_err();
        assert!(matches!(err, ParameterFileError::ParseError { line: 1, .. }));
        let err = RuntimeParameters::parse("nx 4\n").unwrap_err();
        assert!(matches!(err, ParameterFileError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_later_values_override() {
        let p = RuntimeParameters::parse("a = 1\na = 2\n").unwrap();
        assert_eq!(p.get_f64("a").unwrap(), 2.0);
    }
}
