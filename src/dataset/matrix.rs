// Row-major f64 matrix — the carrier type for every numeric artifact.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A dense row-major matrix of f64 values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    /// An empty matrix with a fixed column count, ready for `push_row`.
    pub fn with_cols(cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::new(),
        }
    }

    /// Preallocate for a known row count.
    pub fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            rows: 0,
            cols,
            data: Vec::with_capacity(rows * cols),
        }
    }

    /// Append one row. The row width must match the column count.
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.cols {
            anyhow::bail!(
                "Row width {} does not match matrix column count {}",
                row.len(),
                self.cols
            );
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Check the shape invariant after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.data.len() != self.rows * self.cols {
            anyhow::bail!(
                "Matrix shape mismatch: {}x{} declared but {} values stored",
                self.rows,
                self.cols,
                self.data.len()
            );
        }
        Ok(())
    }

    /// Copy a contiguous column range into a new matrix.
    pub fn slice_cols(&self, range: std::ops::Range<usize>) -> Matrix {
        let width = range.end - range.start;
        let mut out = Matrix::with_capacity(self.rows, width);
        for i in 0..self.rows {
            let row = self.row(i);
            out.data.extend_from_slice(&row[range.start..range.end]);
            out.rows += 1;
        }
        out
    }

    /// Concatenate matrices side by side. All must share a row count.
    pub fn hconcat(parts: &[&Matrix]) -> Result<Matrix> {
        let rows = parts.first().map(|m| m.rows).unwrap_or(0);
        for m in parts {
            if m.rows != rows {
                anyhow::bail!(
                    "Cannot concatenate matrices with differing row counts ({} vs {})",
                    m.rows,
                    rows
                );
            }
        }

        let cols = parts.iter().map(|m| m.cols).sum();
        let mut out = Matrix::with_capacity(rows, cols);
        for i in 0..rows {
            for m in parts {
                out.data.extend_from_slice(m.row(i));
            }
            out.rows += 1;
        }
        Ok(out)
    }

    /// Reorder rows by the given permutation (new row i = old row order[i]).
    pub fn permute_rows(&self, order: &[usize]) -> Matrix {
        let mut out = Matrix::with_capacity(order.len(), self.cols);
        for &src in order {
            out.data.extend_from_slice(self.row(src));
            out.rows += 1;
        }
        out
    }

    /// Split into (top, bottom) at a row index.
    pub fn split_rows(&self, at: usize) -> (Matrix, Matrix) {
        let at = at.min(self.rows);
        let top = Matrix {
            rows: at,
            cols: self.cols,
            data: self.data[..at * self.cols].to_vec(),
        };
        let bottom = Matrix {
            rows: self.rows - at,
            cols: self.cols,
            data: self.data[at * self.cols..].to_vec(),
        };
        (top, bottom)
    }
}
