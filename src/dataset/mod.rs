// Dataset assembly — matrices, normalization, splitting, persistence.

pub mod artifacts;
pub mod matrix;
pub mod normalize;
pub mod split;

pub use matrix::Matrix;
