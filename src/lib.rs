// Capsid: training-dataset builder for a phage structural-protein classifier
//
// This is the library root. Each module corresponds to a major stage of the
// dataset pipeline: download sequences from NCBI, parse FASTA, extract
// numeric features, assemble and split the final dataset.

pub mod classes;
pub mod config;
pub mod dataset;
pub mod entrez;
pub mod fasta;
pub mod features;
pub mod pipeline;
pub mod status;
