// Final dataset assembly: one-hot labels, seeded shuffle, fixed-offset split.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::classes::CLASS_COUNT;

use super::matrix::Matrix;

/// Default shuffle seed — fixed so dataset builds are reproducible.
pub const DEFAULT_SEED: u64 = 1234;

/// Default train partition size in rows.
pub const DEFAULT_TRAIN_ROWS: usize = 63000;

/// One-hot encode integer labels into a CLASS_COUNT-wide matrix.
pub fn one_hot(labels: &[usize]) -> Result<Matrix> {
    let mut m = Matrix::with_capacity(labels.len(), CLASS_COUNT);
    for &label in labels {
        if label >= CLASS_COUNT {
            anyhow::bail!("Label {label} out of range (expected 0..{CLASS_COUNT})");
        }
        let mut row = vec![0.0; CLASS_COUNT];
        row[label] = 1.0;
        m.push_row(&row)?;
    }
    Ok(m)
}

/// A seeded random permutation of 0..n.
pub fn shuffled_indices(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// Assemble the final dataset matrix: [id | z-scored features | motif
/// counts | one-hot labels], row-aligned across all four parts.
pub fn assemble(
    ids: &[usize],
    zscored: &Matrix,
    motif_counts: &Matrix,
    labels: &Matrix,
) -> Result<Matrix> {
    let mut id_col = Matrix::with_capacity(ids.len(), 1);
    for &id in ids {
        id_col.push_row(&[id as f64])?;
    }
    Matrix::hconcat(&[&id_col, zscored, motif_counts, labels])
}
