// Artifact status display — what exists on disk, and how big it is.

use anyhow::Result;
use colored::Colorize;

use crate::classes::ALL_CLASSES;
use crate::config::Config;
use crate::dataset::artifacts::{self, ExtractManifest};

/// Display pipeline state to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "=== FASTA inputs ===".bold());
    let mut have_fasta = 0;
    for class in &ALL_CLASSES {
        let path = config.fasta_dir.join(class.fasta_file);
        match std::fs::metadata(&path) {
            Ok(meta) => {
                println!("  {:<20} {}", class.name, format_bytes(meta.len()));
                have_fasta += 1;
            }
            Err(_) => println!("  {:<20} {}", class.name, "missing".dimmed()),
        }
    }
    if have_fasta == 0 {
        println!("  Run `capsid download` to fetch sequences.");
    }

    println!("\n{}", "=== Extraction artifacts ===".bold());
    match artifacts::read_json::<ExtractManifest>(&config.data_dir, artifacts::EXTRACT_MANIFEST)
    {
        Ok(manifest) => {
            println!(
                "  Extracted {} sequences x {} motif patterns ({})",
                manifest.rows,
                manifest.motif_count,
                manifest.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            for entry in &manifest.class_rows {
                println!("    {:<20} {} rows", entry.class, entry.rows);
            }
        }
        Err(_) => {
            println!("  Not extracted yet. Run `capsid extract`.");
        }
    }

    println!("\n{}", "=== Dataset artifacts ===".bold());
    let finals = [artifacts::TRAIN_FINAL, artifacts::TEST_FINAL];
    let mut have_final = 0;
    for name in finals {
        let path = config.data_dir.join(name);
        match std::fs::metadata(&path) {
            Ok(meta) => {
                println!("  {:<20} {}", name, format_bytes(meta.len()));
                have_final += 1;
            }
            Err(_) => println!("  {:<20} {}", name, "missing".dimmed()),
        }
    }
    if have_final == 0 {
        println!("  Run `capsid build` to produce the train/test split.");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
