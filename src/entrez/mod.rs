// NCBI Entrez E-utilities access — search sessions and batch FASTA download.

pub mod client;
pub mod download;
