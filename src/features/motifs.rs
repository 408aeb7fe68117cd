// Regex motif features.
//
// The motif list is a plain text file with one regex per line (the
// informative k-mer patterns mined upstream). Each sequence's motif
// vector is the count of non-overlapping matches of each pattern against
// the raw uppercased sequence — ambiguity codes are left intact here so
// patterns written against them still match.

use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;

/// A compiled, ordered motif list. Column order of the motif feature
/// block follows the file's line order.
#[derive(Debug)]
pub struct MotifSet {
    patterns: Vec<(String, Regex)>,
}

impl MotifSet {
    /// Load and compile a motif file. Blank lines and surrounding
    /// whitespace are ignored; a pattern that fails to compile is a hard
    /// error naming the offending line.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read motif file: {}", path.display()))?;
        Self::from_lines(content.lines())
    }

    /// Compile patterns from an iterator of lines.
    pub fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Result<Self> {
        let mut patterns = Vec::new();
        for (lineno, line) in lines.enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let regex = Regex::new(trimmed).with_context(|| {
                format!("Invalid motif regex on line {}: {trimmed}", lineno + 1)
            })?;
            patterns.push((trimmed.to_string(), regex));
        }
        Ok(Self { patterns })
    }

    /// Number of motif columns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Non-overlapping match counts per pattern, as f64 for direct
    /// concatenation into the dataset matrix.
    pub fn count_matches(&self, sequence: &str) -> Vec<f64> {
        self.patterns
            .iter()
            .map(|(_, regex)| regex.find_iter(sequence).count() as f64)
            .collect()
    }

    /// The source pattern strings, in column order.
    pub fn pattern_strings(&self) -> Vec<&str> {
        self.patterns.iter().map(|(s, _)| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_lines_skips_blanks_and_trims() {
        let set = MotifSet::from_lines("GXS.G\n\n  K[RK]LL  \n".lines()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.pattern_strings(), vec!["GXS.G", "K[RK]LL"]);
    }

    #[test]
    fn test_invalid_pattern_names_line() {
        let err = MotifSet::from_lines("GAS\n[unclosed\n".lines()).unwrap_err();
        assert!(format!("{err}").contains("line 2"));
    }

    #[test]
    fn test_count_matches_per_pattern() {
        let set = MotifSet::from_lines("GA\nK.K\nZZZ\n".lines()).unwrap();
        let counts = set.count_matches("GAKLKGAGA");
        assert_eq!(counts, vec![3.0, 1.0, 0.0]);
    }

    #[test]
    fn test_counts_are_non_overlapping() {
        // "AAAA" contains three overlapping "AA" but two non-overlapping.
        let set = MotifSet::from_lines("AA".lines()).unwrap();
        assert_eq!(set.count_matches("AAAA"), vec![2.0]);
    }

    #[test]
    fn test_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"G.S\nW{2}\n").unwrap();
        f.flush().unwrap();

        let set = MotifSet::load(f.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.count_matches("GASWWGTS"), vec![2.0, 1.0]);
    }

    #[test]
    fn test_missing_file_is_hard_error() {
        let err = MotifSet::load(Path::new("/no/such/motifs.txt")).unwrap_err();
        assert!(format!("{err}").contains("Failed to read motif file"));
    }
}
