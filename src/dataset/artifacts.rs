// Artifact persistence — the fixed set of files the pipeline reads/writes.
//
// Numeric artifacts are JSON documents (matrices as row-major {rows, cols,
// data}); the per-sequence description table is CSV. Artifact names mirror
// the upstream dataset layout so downstream training code can find them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Raw extraction outputs.
pub const RAW_FEATURES: &str = "raw_features.json";
pub const RAW_MOTIFS: &str = "raw_motifs.json";
pub const RAW_LABELS: &str = "raw_labels.json";
pub const RAW_IDS: &str = "raw_ids.json";
pub const DESCRIPTIONS: &str = "descriptions.csv";
pub const EXTRACT_MANIFEST: &str = "extract_manifest.json";

// Build outputs.
pub const MEAN_FINAL: &str = "mean_final.json";
pub const STD_FINAL: &str = "std_final.json";
pub const TRAIN_FINAL: &str = "train_final.json";
pub const TEST_FINAL: &str = "test_final.json";

/// Per-block slice names, in the order of the feature layout.
pub const BLOCK_NAMES: [&str; 7] = [
    "di", "tri", "di_sc", "tri_sc", "tetra_sc", "physchem", "motif",
];

/// Filename for one block slice of one partition, e.g. `di_train.json`.
pub fn block_file(block: &str, partition: &str) -> String {
    format!("{block}_{partition}.json")
}

/// Filename for a partition's label block (`train_Y.json`) or id column.
pub fn label_file(partition: &str) -> String {
    format!("{partition}_Y.json")
}

pub fn id_file(partition: &str) -> String {
    format!("{partition}_id.json")
}

/// One row of the description table: internal id, accession, free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DescriptionRow {
    pub sec_code: usize,
    pub seq_id: String,
    pub description: String,
}

/// Summary of an extraction run, written alongside the raw artifacts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractManifest {
    pub rows: usize,
    pub motif_count: usize,
    pub class_rows: Vec<ClassRows>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassRows {
    pub class: String,
    pub rows: usize,
}

/// Serialize a value to a JSON artifact in `dir`.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join(name);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create artifact: {}", path.display()))?;
    serde_json::to_writer(std::io::BufWriter::new(file), value)
        .with_context(|| format!("Failed to serialize artifact: {}", path.display()))?;
    Ok(path)
}

/// Deserialize a JSON artifact from `dir`.
pub fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let file = std::fs::File::open(&path).with_context(|| {
        format!(
            "Missing artifact {} — run the earlier pipeline stage first",
            path.display()
        )
    })?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse artifact: {}", path.display()))
}

/// Write the description table as CSV.
pub fn write_descriptions(dir: &Path, rows: &[DescriptionRow]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    let path = dir.join(DESCRIPTIONS);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create description table: {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .context("Failed to write description row")?;
    }
    writer.flush().context("Failed to flush description table")?;
    Ok(path)
}

/// Read the description table back.
pub fn read_descriptions(dir: &Path) -> Result<Vec<DescriptionRow>> {
    let path = dir.join(DESCRIPTIONS);
    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("Missing description table: {}", path.display()))?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.context("Malformed description row")?);
    }
    Ok(rows)
}
