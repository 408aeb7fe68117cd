// The 11 phage structural-protein classes.
//
// Each class carries its integer label (the row label in the dataset),
// the Entrez search term used to find candidate sequences, and the name
// of the per-class FASTA file. Label order is fixed — the extractor walks
// classes in this order, and the one-hot encoding in the final dataset
// depends on it.

/// Number of structural classes (width of the one-hot label block).
pub const CLASS_COUNT: usize = 11;

/// How a class's search term should be expanded into a full query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryKind {
    /// Simple keyword — gets `[Title]` appended and the standard filters.
    Title,
    /// Already-fielded boolean expression — used verbatim plus the filters.
    Raw,
    /// No remote query. The "others" negative set is assembled offline and
    /// only participates in extraction.
    None,
}

/// One structural class of the classifier.
#[derive(Debug, Clone, Copy)]
pub struct StructuralClass {
    /// Integer label, 0..=10. Also the index into `ALL_CLASSES`.
    pub label: usize,
    /// Canonical human-readable name.
    pub name: &'static str,
    /// Entrez search term (interpreted per `query_kind`).
    pub term: &'static str,
    pub query_kind: QueryKind,
    /// FASTA filename within the fasta directory.
    pub fasta_file: &'static str,
}

/// All classes in label order.
pub const ALL_CLASSES: [StructuralClass; CLASS_COUNT] = [
    StructuralClass {
        label: 0,
        name: "major capsid",
        term: "major capsid",
        query_kind: QueryKind::Title,
        fasta_file: "major_capsid.fasta",
    },
    StructuralClass {
        label: 1,
        name: "minor capsid",
        term: "minor capsid",
        query_kind: QueryKind::Title,
        fasta_file: "minor_capsid.fasta",
    },
    StructuralClass {
        label: 2,
        name: "baseplate",
        term: "baseplate",
        query_kind: QueryKind::Title,
        fasta_file: "baseplate.fasta",
    },
    StructuralClass {
        label: 3,
        name: "major tail",
        term: "major tail",
        query_kind: QueryKind::Title,
        fasta_file: "major_tail.fasta",
    },
    StructuralClass {
        label: 4,
        name: "minor tail",
        term: "minor tail",
        query_kind: QueryKind::Title,
        fasta_file: "minor_tail.fasta",
    },
    StructuralClass {
        label: 5,
        name: "portal",
        term: "portal",
        query_kind: QueryKind::Title,
        fasta_file: "portal.fasta",
    },
    StructuralClass {
        label: 6,
        name: "tail fiber",
        term: "tail fiber",
        query_kind: QueryKind::Title,
        fasta_file: "tail_fiber.fasta",
    },
    StructuralClass {
        label: 7,
        name: "tail shaft",
        term: "tail[Title] AND (shaft[Title] OR sheath[Title])",
        query_kind: QueryKind::Raw,
        fasta_file: "shaft.fasta",
    },
    StructuralClass {
        label: 8,
        name: "collar",
        term: "collar",
        query_kind: QueryKind::Title,
        fasta_file: "collar.fasta",
    },
    StructuralClass {
        label: 9,
        name: "head-tail joining",
        // Misspelled in the upstream annotations; the query has to match them.
        term: "head-tail joinning",
        query_kind: QueryKind::Title,
        fasta_file: "HTJ.fasta",
    },
    StructuralClass {
        label: 10,
        name: "others",
        term: "",
        query_kind: QueryKind::None,
        fasta_file: "others.fasta",
    },
];

/// Title-field exclusions applied to every query: uncharacterized and
/// low-confidence annotations (including the common "putitive" misspelling).
const EXCLUDED_TITLE_WORDS: [&str; 6] = [
    "hypothetical",
    "putative",
    "putitive",
    "probable",
    "possible",
    "unknown",
];

/// Sequence-length window: at least 50 residues.
const LENGTH_FILTER: &str = "50:1000000[SLEN]";

impl StructuralClass {
    /// Build the full Entrez search query for this class, or None for
    /// extraction-only classes.
    pub fn search_query(&self) -> Option<String> {
        let head = match self.query_kind {
            QueryKind::Title => format!("({}[Title])", self.term),
            QueryKind::Raw => format!("({})", self.term),
            QueryKind::None => return None,
        };

        let mut query = format!("{head} AND phage[Title]");
        for word in EXCLUDED_TITLE_WORDS {
            query.push_str(&format!(" NOT {word}[Title]"));
        }
        query.push_str(&format!(" AND {LENGTH_FILTER}"));
        Some(query)
    }

    /// Look up a class by (case-insensitive) name or label.
    pub fn find(selector: &str) -> Option<&'static StructuralClass> {
        if let Ok(label) = selector.parse::<usize>() {
            return ALL_CLASSES.get(label);
        }
        let lower = selector.to_lowercase();
        ALL_CLASSES
            .iter()
            .find(|c| c.name == lower || c.name.replace(' ', "_") == lower)
    }
}
