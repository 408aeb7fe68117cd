// Physicochemical descriptors in the classical ProtParam formulation.
//
// Eight scalars per sequence: isoelectric point, instability index, length,
// aromaticity, the two molar extinction coefficients (reduced cysteines and
// cystine bridges), GRAVY hydropathy, and average molecular weight. All are
// computed on the canonicalized sequence; residues outside the 20-letter
// alphabet contribute nothing.

use super::kmer::aa_index;

/// Number of scalar descriptors.
pub const PHYSCHEM_LEN: usize = 8;

/// Average residue masses (average isotopic, free amino acid minus water),
/// indexed by `aa_index` order ACDEFGHIKLMNPQRSTVWY.
const RESIDUE_MASS: [f64; 20] = [
    71.0788,  // A
    103.1388, // C
    115.0886, // D
    129.1155, // E
    147.1766, // F
    57.0519,  // G
    137.1411, // H
    113.1594, // I
    128.1741, // K
    113.1594, // L
    131.1926, // M
    114.1038, // N
    97.1167,  // P
    128.1307, // Q
    156.1875, // R
    87.0782,  // S
    101.1051, // T
    99.1326,  // V
    186.2132, // W
    163.1760, // Y
];

const WATER_MASS: f64 = 18.0153;

/// Kyte-Doolittle hydropathy, indexed by `aa_index` order.
const KYTE_DOOLITTLE: [f64; 20] = [
    1.8,  // A
    2.5,  // C
    -3.5, // D
    -3.5, // E
    2.8,  // F
    -0.4, // G
    -3.2, // H
    4.5,  // I
    -3.9, // K
    3.8,  // L
    1.9,  // M
    -3.5, // N
    -1.6, // P
    -3.5, // Q
    -4.5, // R
    -0.8, // S
    -0.7, // T
    4.2,  // V
    -0.9, // W
    -1.3, // Y
];

/// Guruprasad dipeptide instability weight values (DIWV), rows and columns
/// both in `aa_index` order. Entry [i][j] is the weight of the dipeptide
/// AA[i]·AA[j].
#[rustfmt::skip]
const DIWV: [[f64; 20]; 20] = [
    // A
    [1.0, 44.94, -7.49, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    // C
    [1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 33.60, 1.0, 1.0, 20.26, 33.60, 1.0, 20.26, -6.54, 1.0, 1.0, 33.60, -6.54, 24.68, 1.0],
    // D
    [1.0, 1.0, 1.0, 1.0, -6.54, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, -6.54, 20.26, -14.03, 1.0, 1.0, 1.0],
    // E
    [1.0, 44.94, 20.26, 33.60, 1.0, 1.0, -6.54, 20.26, 1.0, 1.0, 1.0, 1.0, 20.26, 20.26, 1.0, 20.26, 1.0, 1.0, -14.03, 1.0],
    // F
    [1.0, 1.0, 13.34, 1.0, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 33.60],
    // G
    [-7.49, 1.0, 1.0, -6.54, 1.0, 13.34, 1.0, -7.49, -7.49, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 13.34, -7.49],
    // H
    [1.0, 1.0, 1.0, 1.0, -9.37, -9.37, 1.0, 44.94, 24.68, 1.0, 1.0, 24.68, -1.88, 1.0, 1.0, 1.0, -6.54, 1.0, -1.88, 44.94],
    // I
    [1.0, 1.0, 1.0, 44.94, 1.0, 1.0, 13.34, 1.0, -7.49, 20.26, 1.0, 1.0, -1.88, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0],
    // K
    [1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, -7.49, 1.0, -7.49, 33.60, 1.0, -6.54, 24.64, 33.60, 1.0, 1.0, -7.49, 1.0, 1.0],
    // L
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, 1.0, 20.26, 33.60, 20.26, 1.0, 1.0, 1.0, 24.68, 1.0],
    // M
    [13.34, 1.0, 1.0, 1.0, 1.0, 1.0, 58.28, 1.0, 1.0, 1.0, -1.88, 1.0, 44.94, -6.54, -6.54, 44.94, -1.88, 1.0, 1.0, 24.68],
    // N
    [1.0, -1.88, 1.0, 1.0, -14.03, -14.03, 1.0, 44.94, 24.68, 1.0, 1.0, 1.0, -1.88, -6.54, 1.0, 1.0, -7.49, 1.0, -9.37, 1.0],
    // P
    [20.26, -6.54, -6.54, 18.38, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, -6.54, 1.0, 20.26, 20.26, -6.54, 20.26, 1.0, 20.26, -1.88, 1.0],
    // Q
    [1.0, -6.54, 20.26, 20.26, -6.54, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 20.26, 20.26, 1.0, 44.94, 1.0, -6.54, 1.0, -6.54],
    // R
    [1.0, 1.0, 1.0, 1.0, 1.0, -7.49, 20.26, 1.0, 1.0, 1.0, 1.0, 13.34, 20.26, 20.26, 58.28, 44.94, 1.0, 1.0, 58.28, -6.54],
    // S
    [1.0, 33.60, 1.0, 20.26, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 44.94, 20.26, 20.26, 20.26, 1.0, 1.0, 1.0, 1.0],
    // T
    [1.0, 1.0, 1.0, 20.26, 13.34, -7.49, 1.0, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0, -6.54, 1.0, 1.0, 1.0, 1.0, -14.03, 1.0],
    // V
    [1.0, 1.0, -14.03, 1.0, 1.0, -7.49, 1.0, 1.0, -1.88, 1.0, 1.0, 1.0, 20.26, 1.0, 1.0, 1.0, -7.49, 1.0, 1.0, -6.54],
    // W
    [-14.03, 1.0, 1.0, 1.0, 1.0, -9.37, 24.68, 1.0, 1.0, 13.34, 24.68, 13.34, 1.0, 1.0, 1.0, 1.0, -14.03, -7.49, 1.0, 1.0],
    // Y
    [24.68, 1.0, 24.68, -6.54, 1.0, -7.49, 13.34, 1.0, 1.0, 1.0, 44.94, 1.0, 13.34, 1.0, -15.91, 1.0, -7.49, 1.0, -9.37, 13.34],
];

/// Bjellqvist pKa values for the charged groups.
mod pka {
    pub const N_TERM: f64 = 7.5;
    pub const K: f64 = 10.0;
    pub const R: f64 = 12.0;
    pub const H: f64 = 5.98;
    pub const C_TERM: f64 = 3.55;
    pub const D: f64 = 4.05;
    pub const E: f64 = 4.45;
    pub const C: f64 = 9.0;
    pub const Y: f64 = 10.0;
}

fn count(seq: &str, residue: char) -> f64 {
    seq.chars().filter(|&c| c == residue).count() as f64
}

/// Net charge of the sequence at a given pH (Bjellqvist model).
fn charge_at_ph(seq: &str, ph: f64) -> f64 {
    let positive = |pka: f64, n: f64| n / (1.0 + 10f64.powf(ph - pka));
    let negative = |pka: f64, n: f64| n / (1.0 + 10f64.powf(pka - ph));

    positive(pka::N_TERM, 1.0)
        + positive(pka::K, count(seq, 'K'))
        + positive(pka::R, count(seq, 'R'))
        + positive(pka::H, count(seq, 'H'))
        - negative(pka::C_TERM, 1.0)
        - negative(pka::D, count(seq, 'D'))
        - negative(pka::E, count(seq, 'E'))
        - negative(pka::C, count(seq, 'C'))
        - negative(pka::Y, count(seq, 'Y'))
}

/// Isoelectric point: the pH at which the net charge crosses zero,
/// found by bisection over 0..14.
pub fn isoelectric_point(seq: &str) -> f64 {
    let mut lo = 0.0f64;
    let mut hi = 14.0f64;
    let mut mid = 7.0f64;

    while hi - lo > 1e-4 {
        mid = (lo + hi) / 2.0;
        if charge_at_ph(seq, mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    mid
}

/// Guruprasad instability index: (10 / L) × Σ DIWV over consecutive pairs.
/// Values above 40 predict an unstable protein.
pub fn instability_index(seq: &str) -> f64 {
    let bytes = seq.as_bytes();
    if bytes.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for pair in bytes.windows(2) {
        if let (Some(i), Some(j)) = (aa_index(pair[0]), aa_index(pair[1])) {
            total += DIWV[i][j];
        }
    }
    (10.0 / bytes.len() as f64) * total
}

/// Fraction of aromatic residues (F, W, Y).
pub fn aromaticity(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    (count(seq, 'F') + count(seq, 'W') + count(seq, 'Y')) / seq.len() as f64
}

/// Molar extinction coefficients at 280 nm: (all cysteines reduced,
/// all cysteines paired as cystines).
pub fn extinction_coefficients(seq: &str) -> (f64, f64) {
    let reduced = 5500.0 * count(seq, 'W') + 1490.0 * count(seq, 'Y');
    let cystines = reduced + 125.0 * (count(seq, 'C') / 2.0).floor();
    (reduced, cystines)
}

/// Grand average of hydropathy (mean Kyte-Doolittle value).
pub fn gravy(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let total: f64 = seq
        .bytes()
        .filter_map(aa_index)
        .map(|i| KYTE_DOOLITTLE[i])
        .sum();
    total / seq.len() as f64
}

/// Average molecular weight: residue masses plus one water.
pub fn molecular_weight(seq: &str) -> f64 {
    let residues: f64 = seq
        .bytes()
        .filter_map(aa_index)
        .map(|i| RESIDUE_MASS[i])
        .sum();
    if residues == 0.0 {
        return 0.0;
    }
    residues + WATER_MASS
}

/// All eight descriptors in dataset column order.
pub fn descriptors(canonical: &str, raw_len: usize) -> [f64; PHYSCHEM_LEN] {
    let (ext_reduced, ext_cystines) = extinction_coefficients(canonical);
    [
        isoelectric_point(canonical),
        instability_index(canonical),
        raw_len as f64,
        aromaticity(canonical),
        ext_reduced,
        ext_cystines,
        gravy(canonical),
        molecular_weight(canonical),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_sign_behavior() {
        // Polylysine is positive at neutral pH, polyglutamate negative.
        assert!(charge_at_ph("KKKKKKKK", 7.0) > 0.0);
        assert!(charge_at_ph("EEEEEEEE", 7.0) < 0.0);
    }

    #[test]
    fn test_isoelectric_point_ordering() {
        let basic = isoelectric_point("KKKKKKKKKK");
        let acidic = isoelectric_point("EEEEEEEEEE");
        let neutral = isoelectric_point("GGGGGGGGGG");
        assert!(basic > 10.0, "polylysine pI was {basic}");
        assert!(acidic < 4.5, "polyglutamate pI was {acidic}");
        assert!(neutral > acidic && neutral < basic);
    }

    #[test]
    fn test_isoelectric_point_is_charge_neutral() {
        let seq = "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQ";
        let pi = isoelectric_point(seq);
        assert!(charge_at_ph(seq, pi).abs() < 0.01);
    }

    #[test]
    fn test_instability_index_scaling() {
        // All-glycine: every pair scores DIWV[G][G] = 13.34.
        // II = (10/L) × (L−1) × 13.34.
        let seq = "GGGGGGGGGG";
        let expected = (10.0 / 10.0) * 9.0 * 13.34;
        assert!((instability_index(seq) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_instability_empty_sequence() {
        assert_eq!(instability_index(""), 0.0);
    }

    #[test]
    fn test_aromaticity_fraction() {
        assert!((aromaticity("FWYA") - 0.75).abs() < 1e-12);
        assert_eq!(aromaticity("AAAA"), 0.0);
        assert_eq!(aromaticity(""), 0.0);
    }

    #[test]
    fn test_extinction_coefficients() {
        // 2W + 1Y, 3C → one cystine bridge in the oxidized variant.
        let (reduced, cystines) = extinction_coefficients("WWYCCCA");
        assert!((reduced - (2.0 * 5500.0 + 1490.0)).abs() < 1e-9);
        assert!((cystines - (reduced + 125.0)).abs() < 1e-9);
    }

    #[test]
    fn test_gravy_known_values() {
        // Isoleucine is the most hydrophobic (4.5), arginine the least (−4.5).
        assert!((gravy("II") - 4.5).abs() < 1e-12);
        assert!((gravy("RR") + 4.5).abs() < 1e-12);
        assert!((gravy("IR") - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_molecular_weight_dipeptide() {
        // Gly-Gly: 2 × 57.0519 + water.
        let mw = molecular_weight("GG");
        assert!((mw - (2.0 * 57.0519 + 18.0153)).abs() < 1e-6);
    }

    #[test]
    fn test_molecular_weight_monotonic_in_length() {
        assert!(molecular_weight("AAA") > molecular_weight("AA"));
    }

    #[test]
    fn test_descriptors_layout() {
        let d = descriptors("MKWYC", 5);
        assert_eq!(d.len(), PHYSCHEM_LEN);
        assert_eq!(d[2], 5.0); // length slot
        assert!(d[4] > 0.0); // extinction, has W and Y
        assert!(d[7] > 500.0); // molecular weight
    }

    #[test]
    fn test_diwv_table_shape() {
        // Every row/column pair must be a real weight — spot-check a few
        // published values.
        let g = aa_index(b'G').unwrap();
        let a = aa_index(b'A').unwrap();
        let c = aa_index(b'C').unwrap();
        assert!((DIWV[g][g] - 13.34).abs() < 1e-12);
        assert!((DIWV[a][c] - 44.94).abs() < 1e-12);
        assert!((DIWV[a][a] - 1.0).abs() < 1e-12);
    }
}
