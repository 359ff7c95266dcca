//! Error taxonomy for TOPSIS scoring
//!
//! Every variant is terminal for the run: the scorer never returns partial results.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("input must have at least 2 criteria columns (3 including the label column), found {found}")]
    InsufficientColumns { found: usize },

    #[error("decision matrix has no alternatives")]
    EmptyMatrix,

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "the following columns contain non-numeric values: {}. All criteria columns must contain numeric values only",
        .0.join(", ")
    )]
    NonNumericCriteria(Vec<String>),

    #[error("invalid impact symbol '{0}': impacts must be '+' or '-' (or 'max'/'min') separated by commas")]
    InvalidImpactSymbol(String),

    #[error("invalid weight '{0}': weights must be finite non-negative numbers separated by commas")]
    InvalidWeight(String),

    #[error("number of weights ({weights}) and impacts ({impacts}) must match the number of criteria ({criteria})")]
    DimensionMismatch {
        criteria: usize,
        weights: usize,
        impacts: usize,
    },

    #[error("criterion column {column} ('{name}') is all zeros, cannot normalize")]
    ZeroNormColumn { column: usize, name: String },

    #[error("score for row {row} is undefined: it coincides with both the ideal best and the ideal worst")]
    UndefinedScore { row: usize },
}

pub type ScoringResult<T> = std::result::Result<T, ScoringError>;
