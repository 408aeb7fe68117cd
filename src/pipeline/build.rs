// Build stage: raw artifacts in, normalized/shuffled/split dataset out.
//
// Loads the extraction outputs, z-scores the fixed feature block (motif
// counts stay raw), one-hot encodes the labels, shuffles with a fixed
// seed, splits at a fixed row offset, and writes the final matrices plus
// per-block column slices for train and test.

use anyhow::{Context, Result};
use tracing::info;

use crate::classes::CLASS_COUNT;
use crate::config::Config;
use crate::dataset::artifacts::{self, block_file, id_file, label_file};
use crate::dataset::normalize::{column_stats, zscore};
use crate::dataset::split::{assemble, one_hot, shuffled_indices};
use crate::dataset::Matrix;
use crate::features::{
    DI_END, DI_SC_END, FEATURE_LEN, TETRA_SC_END, TRI_END, TRI_SC_END,
};

/// Summary of a build run.
#[derive(Debug)]
pub struct BuildSummary {
    pub train_rows: usize,
    pub test_rows: usize,
    pub columns: usize,
}

/// Run the build stage.
pub fn run(config: &Config, train_rows: usize, seed: u64) -> Result<BuildSummary> {
    let dir = &config.data_dir;

    let features: Matrix = artifacts::read_json(dir, artifacts::RAW_FEATURES)?;
    features.validate()?;
    let motif_counts: Matrix = artifacts::read_json(dir, artifacts::RAW_MOTIFS)?;
    motif_counts.validate()?;
    let labels: Vec<usize> = artifacts::read_json(dir, artifacts::RAW_LABELS)?;
    let ids: Vec<usize> = artifacts::read_json(dir, artifacts::RAW_IDS)?;

    validate_alignment(&features, &motif_counts, &labels, &ids)?;

    info!(
        rows = features.rows,
        motif_cols = motif_counts.cols,
        "Loaded raw artifacts"
    );

    // Per-feature normalization over the fixed block only.
    let stats = column_stats(&features);
    artifacts::write_json(dir, artifacts::MEAN_FINAL, &stats.mean)?;
    artifacts::write_json(dir, artifacts::STD_FINAL, &stats.std)?;
    let zscored = zscore(&features, &stats);

    let labels_one_hot = one_hot(&labels)?;
    let final_matrix = assemble(&ids, &zscored, &motif_counts, &labels_one_hot)?;

    // Fixed-seed shuffle, then the fixed-offset split.
    let order = shuffled_indices(final_matrix.rows, seed);
    let shuffled = final_matrix.permute_rows(&order);
    let (train, test) = shuffled.split_rows(train_rows);

    info!(
        train = train.rows,
        test = test.rows,
        seed = seed,
        "Shuffled and split dataset"
    );

    artifacts::write_json(dir, artifacts::TRAIN_FINAL, &train)?;
    artifacts::write_json(dir, artifacts::TEST_FINAL, &test)?;

    let motif_cols = motif_counts.cols;
    write_partition_slices(config, &train, "train", motif_cols)?;
    write_partition_slices(config, &test, "test", motif_cols)?;

    Ok(BuildSummary {
        train_rows: train.rows,
        test_rows: test.rows,
        columns: shuffled.cols,
    })
}

/// The extraction stage emits its matrices in one pass, but the artifacts
/// live as separate files — re-check row alignment before trusting them.
fn validate_alignment(
    features: &Matrix,
    motif_counts: &Matrix,
    labels: &[usize],
    ids: &[usize],
) -> Result<()> {
    if features.cols != FEATURE_LEN {
        anyhow::bail!(
            "Raw feature matrix has {} columns, expected {FEATURE_LEN}",
            features.cols
        );
    }
    if features.rows != motif_counts.rows
        || features.rows != labels.len()
        || features.rows != ids.len()
    {
        anyhow::bail!(
            "Raw artifacts are misaligned: {} feature rows, {} motif rows, \
             {} labels, {} ids — re-run `capsid extract`",
            features.rows,
            motif_counts.rows,
            labels.len(),
            ids.len()
        );
    }
    // Internal ids are assigned sequentially during extraction.
    for (i, &id) in ids.iter().enumerate() {
        if id != i {
            anyhow::bail!(
                "Id array out of order at row {i} (found {id}) — re-run `capsid extract`"
            );
        }
    }
    Ok(())
}

/// Slice one partition's columns into the per-block artifacts.
///
/// Partition layout: [id | 11201 features | motifs | one-hot]. The block
/// offsets are relative to the feature region starting at column 1.
fn write_partition_slices(
    config: &Config,
    partition: &Matrix,
    name: &str,
    motif_cols: usize,
) -> Result<()> {
    let dir = &config.data_dir;
    let feat = 1usize; // skip the id column

    let expected = 1 + FEATURE_LEN + motif_cols + CLASS_COUNT;
    if partition.cols != expected {
        anyhow::bail!(
            "Partition '{name}' has {} columns, expected {expected}",
            partition.cols
        );
    }

    let blocks: [(usize, usize); 7] = [
        (0, DI_END),
        (DI_END, TRI_END),
        (TRI_END, DI_SC_END),
        (DI_SC_END, TRI_SC_END),
        (TRI_SC_END, TETRA_SC_END),
        (TETRA_SC_END, FEATURE_LEN),
        (FEATURE_LEN, FEATURE_LEN + motif_cols),
    ];

    for (block_name, (start, end)) in artifacts::BLOCK_NAMES.iter().zip(blocks) {
        let slice = partition.slice_cols(feat + start..feat + end);
        artifacts::write_json(dir, &block_file(block_name, name), &slice)
            .with_context(|| format!("Failed to write {block_name} block for {name}"))?;
    }

    let label_start = feat + FEATURE_LEN + motif_cols;
    let label_block = partition.slice_cols(label_start..label_start + CLASS_COUNT);
    artifacts::write_json(dir, &label_file(name), &label_block)?;

    let id_col = partition.slice_cols(0..1);
    artifacts::write_json(dir, &id_file(name), &id_col)?;

    Ok(())
}
