use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use capsid::classes::{QueryKind, StructuralClass, ALL_CLASSES};
use capsid::config::Config;
use capsid::dataset::split::{DEFAULT_SEED, DEFAULT_TRAIN_ROWS};
use capsid::entrez::client::EntrezClient;
use capsid::entrez::download::{self, DEFAULT_BATCH_SIZE};

/// Capsid: training-dataset builder for a phage structural-protein classifier.
///
/// Downloads candidate sequences per structural class from NCBI, extracts
/// fixed-length numeric feature vectors, and serializes normalized
/// train/test splits for the downstream training procedure.
#[derive(Parser)]
#[command(name = "capsid", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the structural classes and their search queries
    Classes,

    /// Download sequences from NCBI into per-class FASTA files
    Download {
        /// Only download one class (by name or label); default is all
        #[arg(long)]
        class: Option<String>,

        /// Records per efetch batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Resume from this batch index (appends to the output file)
        #[arg(long, default_value_t = 0)]
        start_batch: usize,
    },

    /// Extract feature vectors from the per-class FASTA files
    Extract,

    /// Normalize, shuffle, and split the extracted features
    Build {
        /// Number of rows in the train partition
        #[arg(long, default_value_t = DEFAULT_TRAIN_ROWS)]
        train_rows: usize,

        /// Shuffle seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Show which inputs and artifacts exist on disk
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("capsid=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classes => {
            println!("{}", "=== Structural classes ===".bold());
            for class in &ALL_CLASSES {
                println!("\n  [{:>2}] {}", class.label, class.name.bold());
                println!("       file:  {}", class.fasta_file);
                match class.search_query() {
                    Some(query) => println!("       query: {query}"),
                    None => println!(
                        "       query: {} (negative set, extraction only)",
                        "none".dimmed()
                    ),
                }
            }
        }

        Commands::Download {
            class,
            batch_size,
            start_batch,
        } => {
            let config = Config::load()?;
            config.require_entrez()?;

            let selected: Vec<&StructuralClass> = match &class {
                Some(selector) => {
                    let found = StructuralClass::find(selector).ok_or_else(|| {
                        anyhow::anyhow!(
                            "Unknown class '{selector}'. Run `capsid classes` for the list."
                        )
                    })?;
                    if found.query_kind == QueryKind::None {
                        anyhow::bail!(
                            "Class '{}' has no remote query — its FASTA file is assembled offline.",
                            found.name
                        );
                    }
                    vec![found]
                }
                None => ALL_CLASSES
                    .iter()
                    .filter(|c| c.query_kind != QueryKind::None)
                    .collect(),
            };

            std::fs::create_dir_all(&config.fasta_dir)?;
            let client = EntrezClient::new(
                &config.eutils_url,
                &config.entrez_email,
                config.ncbi_api_key.clone(),
            )?;

            for class in selected {
                let out_path = config.fasta_dir.join(class.fasta_file);
                println!(
                    "Downloading '{}' sequences to {}...",
                    class.name.bold(),
                    out_path.display()
                );

                let report = download::download_class(
                    &client,
                    class,
                    &out_path,
                    batch_size,
                    start_batch,
                )
                .await?;

                info!(
                    class = class.name,
                    records = report.total_records,
                    batches = report.batches_fetched,
                    "Class download complete"
                );
                println!(
                    "  {} records in {} batches",
                    report.total_records, report.batches_fetched
                );
            }

            println!("\n{}", "Download complete.".bold());
        }

        Commands::Extract => {
            let config = Config::load()?;

            println!("Extracting features from {}...", config.fasta_dir.display());
            let summary = capsid::pipeline::extract::run(&config)?;

            println!("\n{}", "Extraction complete.".bold());
            println!(
                "  {} sequences x {} k-mer/physicochemical features",
                summary.rows,
                capsid::features::FEATURE_LEN
            );
            println!("  {} motif patterns", summary.motif_count);
            for (class, rows) in &summary.per_class {
                println!("    {:<20} {} rows", class, rows);
            }
            println!("  Artifacts written to {}", config.data_dir.display());
        }

        Commands::Build { train_rows, seed } => {
            let config = Config::load()?;

            println!("Building the normalized dataset...");
            let summary = capsid::pipeline::build::run(&config, train_rows, seed)?;

            println!("\n{}", "Build complete.".bold());
            println!(
                "  train: {} rows, test: {} rows ({} columns each)",
                summary.train_rows, summary.test_rows, summary.columns
            );
            println!("  Artifacts written to {}", config.data_dir.display());
        }

        Commands::Status => {
            let config = Config::load()?;
            capsid::status::show(&config)?;
        }
    }

    Ok(())
}
