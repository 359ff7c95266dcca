//! Normalization Utilities
//!
//! Stage 1 (vector normalization) and stage 2 (weighting) of the TOPSIS pipeline.
//!
//! Vector normalization divides every value by the Euclidean norm of its column,
//! so criteria measured in different units become comparable:
//!
//! ```text
//! norm_j  = sqrt(Σ_i value[i][j]²)
//! N[i][j] = value[i][j] / norm_j
//! ```

use crate::error::{ScoringError, ScoringResult};
use crate::types::{DecisionMatrix, WeightVector};

/// Euclidean norm of every criterion column
///
/// Squares are accumulated in row order so repeated runs are bit-identical.
/// Columns whose squares overflow to infinity or underflow to zero are
/// recomputed relative to their largest magnitude, so only a column of exact
/// zeros has a zero norm.
pub fn column_norms(matrix: &DecisionMatrix) -> Vec<f64> {
    let mut sums = vec![0.0; matrix.n_criteria()];
    let mut max_abs = vec![0.0f64; matrix.n_criteria()];
    for row in matrix.rows() {
        for ((sum, peak), value) in sums.iter_mut().zip(max_abs.iter_mut()).zip(row) {
            *sum += value * value;
            *peak = peak.max(value.abs());
        }
    }

    sums.into_iter()
        .zip(max_abs)
        .enumerate()
        .map(|(j, (sum, peak))| {
            if sum.is_infinite() || (sum == 0.0 && peak > 0.0) {
                scaled_norm(matrix, j, peak)
            } else {
                sum.sqrt()
            }
        })
        .collect()
}

/// `peak * sqrt(Σ (x / peak)²)`, safe for values near the f64 range limits
fn scaled_norm(matrix: &DecisionMatrix, column: usize, peak: f64) -> f64 {
    let sum: f64 = matrix
        .rows()
        .iter()
        .map(|row| (row[column] / peak).powi(2))
        .sum();
    peak * sum.sqrt()
}

/// Vector-normalize every column of the matrix
///
/// # Errors
/// `ZeroNormColumn` for the first column whose values are all exactly zero;
/// dividing by a zero norm would poison every score with NaN.
pub fn vector_normalize(matrix: &DecisionMatrix) -> ScoringResult<Vec<Vec<f64>>> {
    let norms = column_norms(matrix);

    if let Some(column) = norms.iter().position(|&norm| norm == 0.0) {
        return Err(ScoringError::ZeroNormColumn {
            column,
            name: matrix.criteria()[column].clone(),
        });
    }

    let normalized = matrix
        .rows()
        .iter()
        .map(|row| row.iter().zip(&norms).map(|(value, norm)| value / norm).collect())
        .collect();

    Ok(normalized)
}

/// Multiply each normalized column by its weight
///
/// Caller guarantees `weights.len()` equals the row width.
pub fn apply_weights(normalized: &[Vec<f64>], weights: &WeightVector) -> Vec<Vec<f64>> {
    normalized
        .iter()
        .map(|row| {
            row.iter()
                .zip(weights.as_slice())
                .map(|(value, weight)| value * weight)
                .collect()
        })
        .collect()
}
