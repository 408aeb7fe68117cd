// Per-feature z-score normalization.
//
// Mean and population standard deviation are computed per column and
// persisted so downstream inference can reuse them. Columns with zero
// variance would z-score to NaN; those columns are masked to exactly 0
// instead.

use serde::{Deserialize, Serialize};

use super::matrix::Matrix;

/// Per-column mean and standard deviation of a feature matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Compute per-column mean and population std (ddof = 0).
pub fn column_stats(m: &Matrix) -> ColumnStats {
    let n = m.rows as f64;
    let mut mean = vec![0.0; m.cols];
    let mut std = vec![0.0; m.cols];

    if m.rows == 0 {
        return ColumnStats { mean, std };
    }

    for i in 0..m.rows {
        let row = m.row(i);
        for (j, &v) in row.iter().enumerate() {
            mean[j] += v;
        }
    }
    for v in &mut mean {
        *v /= n;
    }

    for i in 0..m.rows {
        let row = m.row(i);
        for (j, &v) in row.iter().enumerate() {
            let d = v - mean[j];
            std[j] += d * d;
        }
    }
    for v in &mut std {
        *v = (*v / n).sqrt();
    }

    ColumnStats { mean, std }
}

/// Z-score every column. Zero-variance columns become exactly 0.
pub fn zscore(m: &Matrix, stats: &ColumnStats) -> Matrix {
    let mut out = Matrix::with_capacity(m.rows, m.cols);
    for i in 0..m.rows {
        let row = m.row(i);
        for (j, &v) in row.iter().enumerate() {
            let z = if stats.std[j] == 0.0 {
                0.0
            } else {
                (v - stats.mean[j]) / stats.std[j]
            };
            out.data.push(z);
        }
        out.rows += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        let mut m = Matrix::with_cols(rows[0].len());
        for r in rows {
            m.push_row(r).unwrap();
        }
        m
    }

    #[test]
    fn test_column_stats_population_std() {
        let m = matrix(&[&[1.0, 10.0], &[3.0, 10.0], &[5.0, 10.0]]);
        let stats = column_stats(&m);

        assert!((stats.mean[0] - 3.0).abs() < 1e-12);
        // Population std of {1,3,5} is sqrt(8/3)
        assert!((stats.std[0] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
        // Constant column
        assert!((stats.mean[1] - 10.0).abs() < 1e-12);
        assert_eq!(stats.std[1], 0.0);
    }

    #[test]
    fn test_zscore_zero_mean_unit_variance() {
        let m = matrix(&[&[1.0], &[2.0], &[3.0], &[4.0]]);
        let stats = column_stats(&m);
        let z = zscore(&m, &stats);

        let zstats = column_stats(&z);
        assert!(zstats.mean[0].abs() < 1e-12);
        assert!((zstats.std[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zscore_masks_zero_variance_to_zero() {
        let m = matrix(&[&[7.0, 1.0], &[7.0, 2.0], &[7.0, 3.0]]);
        let stats = column_stats(&m);
        let z = zscore(&m, &stats);

        for i in 0..z.rows {
            assert_eq!(z.get(i, 0), 0.0, "zero-variance column must be exactly 0");
        }
        // The varying column is untouched by the mask
        assert!(z.get(0, 1) < 0.0 && z.get(2, 1) > 0.0);
    }

    #[test]
    fn test_zscore_never_produces_nan() {
        let m = matrix(&[&[0.0, 5.0], &[0.0, 5.0]]);
        let stats = column_stats(&m);
        let z = zscore(&m, &stats);
        assert!(z.data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_matrix() {
        let m = Matrix::with_cols(3);
        let stats = column_stats(&m);
        assert_eq!(stats.mean, vec![0.0; 3]);
        let z = zscore(&m, &stats);
        assert_eq!(z.rows, 0);
    }
}
