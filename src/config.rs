use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default NCBI E-utilities endpoint.
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Only the Entrez contact email has no default — NCBI requires one
/// on every E-utilities request, so `download` refuses to run without it.
pub struct Config {
    /// Contact email sent with every E-utilities request (NCBI policy).
    pub entrez_email: String,
    /// Optional NCBI API key — raises the request rate cap when set.
    pub ncbi_api_key: Option<String>,
    /// E-utilities base URL (override for testing against a local stub).
    pub eutils_url: String,
    /// Directory holding one FASTA file per structural class.
    pub fasta_dir: PathBuf,
    /// Directory where dataset artifacts are written.
    pub data_dir: PathBuf,
    /// Newline-separated regex motif list used by the extractor.
    pub motif_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let data_dir = env::var("CAPSID_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let motif_file = env::var("CAPSID_MOTIF_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("informative_kmer_re.txt"));

        Ok(Self {
            entrez_email: env::var("CAPSID_ENTREZ_EMAIL").unwrap_or_default(),
            ncbi_api_key: env::var("NCBI_API_KEY").ok(),
            eutils_url: env::var("CAPSID_EUTILS_URL")
                .unwrap_or_else(|_| DEFAULT_EUTILS_URL.to_string()),
            fasta_dir: env::var("CAPSID_FASTA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fasta")),
            data_dir,
            motif_file,
        })
    }

    /// Check that the Entrez contact email is configured.
    /// Call this before any operation that talks to NCBI.
    pub fn require_entrez(&self) -> Result<()> {
        if self.entrez_email.is_empty() {
            anyhow::bail!(
                "CAPSID_ENTREZ_EMAIL not set. NCBI requires a contact email on\n\
                 E-utilities requests — add it to your .env file."
            );
        }
        Ok(())
    }
}
