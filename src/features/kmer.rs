// K-mer composition features.
//
// Two alphabets: the 20 standard amino acids, and a 7-class reduced
// alphabet that pools residues by physicochemical character (aliphatic,
// polar, small, cysteine, basic, acidic, aromatic). Counts are overlapping
// sliding-window counts, normalized by the number of windows, len − (k−1).
// A window containing a residue outside the alphabet counts nothing; its
// slot in the denominator stays.

/// The 20 standard amino acids in lexicographic order. K-mer vector slots
/// follow this order with the leading residue most significant.
pub const AA: [u8; 20] = *b"ACDEFGHIKLMNPQRSTVWY";

/// Number of reduced-alphabet classes.
pub const REDUCED_CLASSES: usize = 7;

/// Index of a residue in the standard alphabet.
pub fn aa_index(residue: u8) -> Option<usize> {
    AA.iter().position(|&a| a == residue)
}

/// Reduced-alphabet class of a residue (0..=6).
///
/// A,I,L,M,V → 0 (aliphatic); N,Q,S,T → 1 (polar); G,P → 2 (small/turn);
/// C → 3; H,K,R → 4 (basic); D,E → 5 (acidic); F,W,Y → 6 (aromatic).
pub fn reduced_class(residue: u8) -> Option<usize> {
    match residue {
        b'A' | b'I' | b'L' | b'M' | b'V' => Some(0),
        b'N' | b'Q' | b'S' | b'T' => Some(1),
        b'G' | b'P' => Some(2),
        b'C' => Some(3),
        b'H' | b'K' | b'R' => Some(4),
        b'D' | b'E' => Some(5),
        b'F' | b'W' | b'Y' => Some(6),
        _ => None,
    }
}

/// Overlapping k-mer frequencies over the standard 20-letter alphabet.
/// Returns a vector of length 20^k.
pub fn peptide_frequencies(canonical: &str, k: usize) -> Vec<f64> {
    kmer_frequencies(canonical.as_bytes(), k, 20, aa_index)
}

/// Overlapping k-mer frequencies over the reduced 7-class alphabet.
/// Returns a vector of length 7^k.
pub fn reduced_frequencies(canonical: &str, k: usize) -> Vec<f64> {
    kmer_frequencies(canonical.as_bytes(), k, REDUCED_CLASSES, reduced_class)
}

fn kmer_frequencies(
    seq: &[u8],
    k: usize,
    base: usize,
    index_of: fn(u8) -> Option<usize>,
) -> Vec<f64> {
    let size = base.pow(k as u32);
    let mut freqs = vec![0.0; size];

    // Degenerate denominator: a sequence shorter than k has no windows.
    if seq.len() < k {
        return freqs;
    }
    let denom = (seq.len() - (k - 1)) as f64;

    for window in seq.windows(k) {
        let mut idx = 0usize;
        let mut valid = true;
        for &residue in window {
            match index_of(residue) {
                Some(i) => idx = idx * base + i,
                None => {
                    valid = false;
                    break;
                }
            }
        }
        if valid {
            freqs[idx] += 1.0;
        }
    }

    for f in &mut freqs {
        *f /= denom;
    }
    freqs
}
