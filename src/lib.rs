//! TOPSIS Scorer
//!
//! Ranks alternatives over numeric criteria by their closeness to an ideal
//! solution (Technique for Order Preference by Similarity to Ideal Solution).
//!
//! Module layout:
//! - `types`: Validated decision matrix, weights, impacts and result rows
//! - `utils/`: Pipeline stages (normalization, ideal points, ranking)
//! - `scorer`: Coordinator running the full pipeline
//! - `data`: Table loading and result writing with Polars
//! - `error`: Closed error taxonomy
//!
//! ```rust
//! use topsis_scorer::{compute, DecisionMatrix, ImpactVector, WeightVector};
//!
//! let matrix = DecisionMatrix::from_values(vec![
//!     vec![1.0, 7.0, 9.0, 9.0, 8.0],
//!     vec![4.0, 5.0, 6.0, 7.0, 8.0],
//! ])?;
//! let weights = WeightVector::parse("1,1,1,1,1")?;
//! let impacts = ImpactVector::parse("+,+,-,+,-")?;
//!
//! let rows = compute(&matrix, &weights, &impacts)?;
//! assert_eq!(rows[1].rank, 1);
//! # Ok::<(), topsis_scorer::ScoringError>(())
//! ```

pub mod error;
pub mod types;
pub mod utils;
pub mod scorer;
pub mod data;

// Re-export commonly used types
pub use error::{ScoringError, ScoringResult};
pub use types::{DecisionMatrix, Impact, ImpactVector, ResultRow, WeightVector};
pub use scorer::{compute, TopsisReport, TopsisScorer};
pub use data::{read_decision_table, write_results, DecisionTable, TableOptions};
