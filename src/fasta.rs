// FASTA input and residue canonicalization.
//
// Records come in via bio's FASTA reader. Before any feature computation
// the sequence is uppercased and its ambiguity codes are collapsed onto
// canonical residues: X→A, J→L, *→A, Z→E, B→D. Motif matching runs on the
// uppercased but uncollapsed form, so patterns written against ambiguity
// codes still hit.

use std::path::Path;

use anyhow::{Context, Result};
use bio::io::fasta;

/// One protein sequence as read from a class FASTA file.
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    /// Accession id from the FASTA header.
    pub id: String,
    /// Full header line (id plus free-text description).
    pub description: String,
    /// Uppercased amino-acid string, ambiguity codes intact.
    pub residues: String,
}

impl SequenceRecord {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// The canonicalized form used for k-mer and physicochemical features.
    pub fn canonical(&self) -> String {
        canonicalize(&self.residues)
    }
}

/// Collapse ambiguity codes onto canonical residues.
///
/// X (any) → A, J (I/L) → L, * (stop) → A, Z (E/Q) → E, B (D/N) → D.
/// Anything else passes through unchanged.
pub fn canonicalize(residues: &str) -> String {
    residues
        .chars()
        .map(|c| match c {
            'X' => 'A',
            'J' => 'L',
            '*' => 'A',
            'Z' => 'E',
            'B' => 'D',
            other => other,
        })
        .collect()
}

/// Read every record from a FASTA file.
pub fn read_records(path: &Path) -> Result<Vec<SequenceRecord>> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open FASTA file: {}", path.display()))?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result
            .with_context(|| format!("Malformed FASTA record in {}", path.display()))?;

        let seq = std::str::from_utf8(record.seq())
            .with_context(|| format!("Non-UTF8 sequence data in {}", path.display()))?
            .to_uppercase();

        let description = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };

        records.push(SequenceRecord {
            id: record.id().to_string(),
            description,
            residues: seq,
        });
    }

    Ok(records)
}

/// Count records without materializing sequences — the extractor's first
/// pass, used to preallocate the feature matrix.
pub fn count_records(path: &Path) -> Result<usize> {
    let reader = fasta::Reader::from_file(path)
        .with_context(|| format!("Failed to open FASTA file: {}", path.display()))?;

    let mut count = 0;
    for result in reader.records() {
        result.with_context(|| format!("Malformed FASTA record in {}", path.display()))?;
        count += 1;
    }
    Ok(count)
}
