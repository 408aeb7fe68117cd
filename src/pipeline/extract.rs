// Extraction stage: per-class FASTA files in, raw numeric artifacts out.
//
// Two passes over the input files: a counting pass so the feature matrix
// can be preallocated, then the extraction pass proper. Each record yields
// its fixed 11201-wide feature row and its motif count row in the same
// step, so the two matrices are row-aligned by construction.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::classes::ALL_CLASSES;
use crate::config::Config;
use crate::dataset::artifacts::{
    self, ClassRows, DescriptionRow, ExtractManifest,
};
use crate::dataset::Matrix;
use crate::fasta;
use crate::features::motifs::MotifSet;
use crate::features::{FeatureExtractor, FEATURE_LEN};

/// Summary of an extraction run, for the end-of-run report.
#[derive(Debug)]
pub struct ExtractSummary {
    pub rows: usize,
    pub motif_count: usize,
    pub per_class: Vec<(String, usize)>,
}

/// Run extraction over every class FASTA file and write the raw artifacts.
pub fn run(config: &Config) -> Result<ExtractSummary> {
    let motifs = MotifSet::load(&config.motif_file)?;
    info!(motifs = motifs.len(), "Loaded motif patterns");
    let extractor = FeatureExtractor::new(motifs);

    // Counting pass: fail early on missing files, preallocate exactly.
    let mut total = 0usize;
    for class in &ALL_CLASSES {
        let path = config.fasta_dir.join(class.fasta_file);
        let count = fasta::count_records(&path).with_context(|| {
            format!(
                "Missing or unreadable FASTA for class '{}' — run `capsid download` first",
                class.name
            )
        })?;
        info!(class = class.name, records = count, "Counted records");
        total += count;
    }

    let mut features = Matrix::with_capacity(total, FEATURE_LEN);
    let mut motif_counts = Matrix::with_capacity(total, extractor.motif_count());
    let mut labels: Vec<usize> = Vec::with_capacity(total);
    let mut ids: Vec<usize> = Vec::with_capacity(total);
    let mut descriptions: Vec<DescriptionRow> = Vec::with_capacity(total);
    let mut per_class: Vec<(String, usize)> = Vec::new();

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} sequences {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut sec_code = 0usize;
    for class in &ALL_CLASSES {
        let path = config.fasta_dir.join(class.fasta_file);
        bar.set_message(class.name.to_string());

        let records = fasta::read_records(&path)?;
        let class_rows = records.len();

        for record in &records {
            let row = extractor.extract(record);
            features.push_row(&row.features)?;
            motif_counts.push_row(&row.motif_counts)?;
            labels.push(class.label);
            ids.push(sec_code);
            descriptions.push(DescriptionRow {
                sec_code,
                seq_id: record.id.clone(),
                description: record.description.clone(),
            });
            sec_code += 1;
            bar.inc(1);
        }

        info!(class = class.name, rows = class_rows, "Extracted class");
        per_class.push((class.name.to_string(), class_rows));
    }
    bar.finish_and_clear();

    let dir = &config.data_dir;
    artifacts::write_json(dir, artifacts::RAW_FEATURES, &features)?;
    artifacts::write_json(dir, artifacts::RAW_MOTIFS, &motif_counts)?;
    artifacts::write_json(dir, artifacts::RAW_LABELS, &labels)?;
    artifacts::write_json(dir, artifacts::RAW_IDS, &ids)?;
    artifacts::write_descriptions(dir, &descriptions)?;
    artifacts::write_json(
        dir,
        artifacts::EXTRACT_MANIFEST,
        &ExtractManifest {
            rows: total,
            motif_count: extractor.motif_count(),
            class_rows: per_class
                .iter()
                .map(|(class, rows)| ClassRows {
                    class: class.clone(),
                    rows: *rows,
                })
                .collect(),
            created_at: chrono::Utc::now(),
        },
    )?;

    Ok(ExtractSummary {
        rows: total,
        motif_count: extractor.motif_count(),
        per_class,
    })
}
