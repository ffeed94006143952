//! Observed order of accuracy under grid refinement.
//!
//! For an error that behaves like `C h^p`, halving `h` divides it by `2^p`,
//! so `p = log2(e_coarse / e_fine)` for successive resolutions.

use std::fmt;

/// Order implied by two errors at resolutions differing by `refinement`.
pub fn observed_order(e_coarse: f64, e_fine: f64, refinement: f64) -> f64 {
    (e_coarse / e_fine).ln() / refinement.ln()
}

/// Errors recorded over a sequence of resolutions.
#[derive(Clone, Debug, Default)]
pub struct ConvergenceStudy {
    /// (cells per side, error), in the order they were added
    pub records: Vec<(usize, f64)>,
}

impl ConvergenceStudy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, n: usize, error: f64) {
        self.records.push((n, error));
    }

    /// Observed order between each consecutive pair of records.
    pub fn orders(&self) -> Vec<f64> {
        self.records
            .windows(2)
            .map(|w| {
                let (n0, e0) = w[0];
                let (n1, e1) = w[1];
                observed_order(e0, e1, n1 as f64 / n0 as f64)
            })
            .collect()
    }

    /// Order observed at the finest refinement, if at least two records exist.
    pub fn final_order(&self) -> Option<f64> {
        self.orders().last().copied()
    }
}

impl fmt::Display for ConvergenceStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, &(n, err)) in self.records.iter().enumerate() {
            if k == 0 {
                writeln!(f, "  n={:4}: error={:.4e}", n, err)?;
            } else {
                let (_, prev) = self.records[k - 1];
                let ratio = prev / err;
                let order = self.orders()[k - 1];
                writeln!(
                    f,
                    "  n={:4}: error={:.4e}, ratio={:.2}, order={:.2}",
                    n, err, ratio, order
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_power_law() {
        let mut study = ConvergenceStudy::new();
        for n in [8, 16, 32, 64] {
            study.push(n, 3.0 / (n as f64).powi(4));
        }
        for p in study.orders() {
            assert!((p - 4.0).abs() < 1e-12);
        }
        assert!(study.to_string().contains("order=4.00"));
    }

    #[test]
    fn test_single_record_has_no_order() {
        let mut study = ConvergenceStudy::new();
        study.push(8, 1e-3);
        assert!(study.final_order().is_none());
    }
}
