//! Reference solutions for validation: reading tabulated profiles,
//! interpolating a computed profile onto the reference abscissae, and
//! relative error norms.

use crate::radiation::error::Error;
use std::fs;
use std::path::Path;

/**
 * A whitespace-delimited numeric table with one header line. Each data row
 * holds the same number of columns.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceTable {
    header: String,
    rows: Vec<Vec<f64>>,
}

impl ReferenceTable {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| Error::InvalidReference("table is empty".into()))?
            .to_string();
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (n, line) in lines.enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            let row = line
                .split_whitespace()
                .map(|word| {
                    word.parse::<f64>().map_err(|e| {
                        Error::InvalidReference(format!("line {}: cannot parse '{}': {}", n + 2, word, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(Error::InvalidReference(format!(
                        "line {} has {} columns, expected {}",
                        n + 2,
                        row.len(),
                        first.len()
                    )));
                }
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Return column `index` (zero-based) of every data row.
    pub fn column(&self, index: usize) -> Result<Vec<f64>, Error> {
        if index >= self.num_columns() {
            return Err(Error::InvalidReference(format!(
                "column {} requested from a table with {} columns",
                index,
                self.num_columns()
            )));
        }
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }
}

/// Linearly interpolate the profile `(x, y)` onto the points `x_target`.
/// The abscissae `x` must be increasing; targets outside `[x[0], x[n-1]]`
/// take the end values.
pub fn interpolate_arrays(x_target: &[f64], x: &[f64], y: &[f64]) -> Result<Vec<f64>, Error> {
    if x.len() != y.len() || x.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "interpolation needs matching non-empty arrays, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    if x.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(Error::InvalidArgument("interpolation abscissae must be increasing".into()));
    }
    let n = x.len();

    Ok(x_target
        .iter()
        .map(|&xt| {
            if xt <= x[0] {
                y[0]
            } else if xt >= x[n - 1] {
                y[n - 1]
            } else {
                let j = x.partition_point(|&xj| xj <= xt);
                let w = (xt - x[j - 1]) / (x[j] - x[j - 1]);
                y[j - 1] + w * (y[j] - y[j - 1])
            }
        })
        .collect())
}

fn check_lengths(numerical: &[f64], exact: &[f64]) -> Result<(), Error> {
    if numerical.len() != exact.len() || exact.is_empty() {
        Err(Error::InvalidArgument(format!(
            "cannot compare profiles of lengths {} and {}",
            numerical.len(),
            exact.len()
        )))
    } else {
        Ok(())
    }
}

/// `sum |a - b| / sum |b|`
pub fn relative_l1_error(numerical: &[f64], exact: &[f64]) -> Result<f64, Error> {
    check_lengths(numerical, exact)?;
    let err: f64 = numerical.iter().zip(exact).map(|(a, b)| (a - b).abs()).sum();
    let norm: f64 = exact.iter().map(|b| b.abs()).sum();

    if norm > 0.0 {
        Ok(err / norm)
    } else {
        Err(Error::InvalidReference("reference profile is identically zero".into()))
    }
}

/// `sum (a - b)^2 / sum b^2`. This is the square of the usual relative L2
/// norm; tolerances quoted for it are on the squared ratio.
pub fn relative_l2_error(numerical: &[f64], exact: &[f64]) -> Result<f64, Error> {
    check_lengths(numerical, exact)?;
    let err: f64 = numerical.iter().zip(exact).map(|(a, b)| (a - b).powi(2)).sum();
    let norm: f64 = exact.iter().map(|b| b * b).sum();

    if norm > 0.0 {
        Ok(err / norm)
    } else {
        Err(Error::InvalidReference("reference profile is identically zero".into()))
    }
}
