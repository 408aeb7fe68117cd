// Pipeline orchestration — the extract and build stages.

pub mod build;
pub mod extract;
