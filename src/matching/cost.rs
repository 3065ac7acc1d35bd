use rayon::prelude::*;
use thiserror::Error;

use crate::core::host::HostTraits;
use crate::core::seeker::SeekerTraits;
use crate::matching::engine::PairingConfig;
use crate::matching::scoring::MatchScore;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cost at ({row}, {col}) is not finite: {value}")]
    NonFinite { row: usize, col: usize, value: f64 },
}

/// Dense row-major matrix of pairing costs: rows are students, columns preceptors
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build a matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Ragged` if the rows differ in length, or
    /// `MatrixError::NonFinite` if any entry is NaN or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            if let Some((c, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(MatrixError::NonFinite {
                    row: r,
                    col: c,
                    value,
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Score every student against every preceptor and store `1 / score`.
    ///
    /// Scores are floored at [`MIN_SCORE`](crate::matching::scoring::MIN_SCORE),
    /// so every cost is finite and positive. Rows are scored in parallel.
    #[must_use]
    pub fn build(seekers: &[&SeekerTraits], hosts: &[&HostTraits], config: &PairingConfig) -> Self {
        let data: Vec<f64> = seekers
            .par_iter()
            .flat_map_iter(|seeker| {
                hosts
                    .iter()
                    .map(move |host| MatchScore::calculate_with_config(seeker, host, config).cost())
            })
            .collect();

        Self {
            rows: seekers.len(),
            cols: hosts.len(),
            data,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Cost of pairing row `row` with column `col`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}
