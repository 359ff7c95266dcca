//! Pipeline stages for TOPSIS scoring
//!
//! Each stage is a pure function over plain row-major matrices:
//! - Normalization: Euclidean column normalization and weighting
//! - Ideal: Ideal best/worst points and separation distances
//! - Ranking: Competition ranking of final scores

pub mod normalization;
pub mod ideal;
pub mod ranking;

// Re-export commonly used functions
pub use normalization::{apply_weights, column_norms, vector_normalize};
pub use ideal::{ideal_solutions, separation_distances, IdealSolutions};
pub use ranking::competition_rank;
