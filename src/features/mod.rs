// Feature extraction — fixed-length numeric vectors from protein sequences.
//
// The 11201-wide feature block is a concatenation with a fixed layout:
//
//   [0,    400)  di-peptide frequencies        (20^2)
//   [400,  8400) tri-peptide frequencies       (20^3)
//   [8400, 8449) reduced-alphabet di-mers      (7^2)
//   [8449, 8792) reduced-alphabet tri-mers     (7^3)
//   [8792, 11193) reduced-alphabet tetra-mers  (7^4)
//   [11193, 11201) physicochemical scalars
//
// The motif count block is variable-width (one column per pattern) and is
// kept separate from the 11201 block — it is never z-scored downstream.

pub mod kmer;
pub mod motifs;
pub mod physchem;

use crate::fasta::SequenceRecord;
use motifs::MotifSet;

pub const DI_PEP_LEN: usize = 400;
pub const TRI_PEP_LEN: usize = 8000;
pub const DI_SC_LEN: usize = 49;
pub const TRI_SC_LEN: usize = 343;
pub const TETRA_SC_LEN: usize = 2401;
pub use physchem::PHYSCHEM_LEN;

/// Block end offsets within the 11201-wide feature vector.
pub const DI_END: usize = DI_PEP_LEN;
pub const TRI_END: usize = DI_END + TRI_PEP_LEN;
pub const DI_SC_END: usize = TRI_END + DI_SC_LEN;
pub const TRI_SC_END: usize = DI_SC_END + TRI_SC_LEN;
pub const TETRA_SC_END: usize = TRI_SC_END + TETRA_SC_LEN;

/// Total width of the fixed feature block.
pub const FEATURE_LEN: usize = TETRA_SC_END + PHYSCHEM_LEN;

/// One extracted row: the fixed feature block plus the motif counts,
/// produced together so their row order can never diverge.
pub struct ExtractedRow {
    pub features: Vec<f64>,
    pub motif_counts: Vec<f64>,
}

/// Single-pass extractor over sequence records.
pub struct FeatureExtractor {
    motifs: MotifSet,
}

impl FeatureExtractor {
    pub fn new(motifs: MotifSet) -> Self {
        Self { motifs }
    }

    pub fn motif_count(&self) -> usize {
        self.motifs.len()
    }

    /// Extract the full feature row for one record.
    ///
    /// K-mer and physicochemical features run on the canonicalized
    /// sequence; motif matching runs on the raw uppercased one.
    pub fn extract(&self, record: &SequenceRecord) -> ExtractedRow {
        let canonical = record.canonical();

        let mut features = Vec::with_capacity(FEATURE_LEN);
        features.extend(kmer::peptide_frequencies(&canonical, 2));
        features.extend(kmer::peptide_frequencies(&canonical, 3));
        features.extend(kmer::reduced_frequencies(&canonical, 2));
        features.extend(kmer::reduced_frequencies(&canonical, 3));
        features.extend(kmer::reduced_frequencies(&canonical, 4));
        features.extend(physchem::descriptors(&canonical, record.len()));
        debug_assert_eq!(features.len(), FEATURE_LEN);

        ExtractedRow {
            features,
            motif_counts: self.motifs.count_matches(&record.residues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: &str) -> SequenceRecord {
        SequenceRecord {
            id: "test".into(),
            description: "test".into(),
            residues: seq.into(),
        }
    }

    #[test]
    fn test_block_offsets_sum_to_feature_len() {
        assert_eq!(DI_END, 400);
        assert_eq!(TRI_END, 8400);
        assert_eq!(DI_SC_END, 8449);
        assert_eq!(TRI_SC_END, 8792);
        assert_eq!(TETRA_SC_END, 11193);
        assert_eq!(FEATURE_LEN, 11201);
    }

    #[test]
    fn test_extract_produces_fixed_width_row() {
        let extractor =
            FeatureExtractor::new(MotifSet::from_lines("GA\nKK\n".lines()).unwrap());
        let row = extractor.extract(&record("MKTAYIAKQRQISFVKSHFSGAKK"));

        assert_eq!(row.features.len(), FEATURE_LEN);
        assert_eq!(row.motif_counts.len(), 2);
        assert_eq!(row.motif_counts, vec![1.0, 1.0]);
    }

    #[test]
    fn test_length_slot_uses_raw_length() {
        let extractor = FeatureExtractor::new(MotifSet::from_lines("".lines()).unwrap());
        let row = extractor.extract(&record("MKXJZB"));
        // Canonicalization is 1:1, so the length slot matches the raw length.
        assert_eq!(row.features[TETRA_SC_END + 2], 6.0);
    }

    #[test]
    fn test_motifs_match_raw_not_canonical() {
        // X canonicalizes to A; a motif on X must match the raw form and a
        // motif on the canonical A must not see it.
        let extractor =
            FeatureExtractor::new(MotifSet::from_lines("MX\nMA\n".lines()).unwrap());
        let row = extractor.extract(&record("MXKL"));
        assert_eq!(row.motif_counts, vec![1.0, 0.0]);
    }
}
