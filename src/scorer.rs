//! TOPSIS Scorer - Main coordinator for scoring alternatives
//!
//! Runs the fixed pipeline over a validated decision matrix:
//!
//! 1. Vector normalization (`utils::normalization`)
//! 2. Weighting (`utils::normalization`)
//! 3. Ideal best / ideal worst (`utils::ideal`)
//! 4. Separation distances (`utils::ideal`)
//! 5. Closeness coefficient: `d_worst / (d_best + d_worst)`
//! 6. Competition ranking (`utils::ranking`)
//!
//! Every stage depends on every row through the column norms and ideal points,
//! so any failure aborts the whole run.

use crate::error::{ScoringError, ScoringResult};
use crate::types::{DecisionMatrix, ImpactVector, ResultRow, WeightVector};
use crate::utils::{
    apply_weights, competition_rank, ideal_solutions, separation_distances, vector_normalize,
    IdealSolutions,
};
use tracing::{debug, info, warn};

/// Main TOPSIS scorer
///
/// Holds the weights and impacts so one scorer can rank several matrices that
/// share the same criteria.
#[derive(Debug, Clone)]
pub struct TopsisScorer {
    weights: WeightVector,
    impacts: ImpactVector,
}

/// Every intermediate value of one scoring run
#[derive(Debug, Clone)]
pub struct TopsisReport {
    /// Weighted normalized matrix (stage 2)
    pub weighted: Vec<Vec<f64>>,
    /// Ideal best / worst per criterion (stage 3)
    pub ideal: IdealSolutions,
    /// Distance of each row to the ideal best (stage 4)
    pub distance_best: Vec<f64>,
    /// Distance of each row to the ideal worst (stage 4)
    pub distance_worst: Vec<f64>,
    /// Scores and ranks in input row order
    pub rows: Vec<ResultRow>,
}

impl TopsisScorer {
    pub fn new(weights: WeightVector, impacts: ImpactVector) -> Self {
        let zero_weights = weights.as_slice().iter().filter(|&&w| w == 0.0).count();
        if zero_weights > 0 {
            warn!("{} criteria have zero weight and will not affect scores", zero_weights);
        }
        Self { weights, impacts }
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn impacts(&self) -> &ImpactVector {
        &self.impacts
    }

    /// Score and rank every alternative
    ///
    /// Results come back in input row order; rank is a field, not a reordering.
    pub fn score(&self, matrix: &DecisionMatrix) -> ScoringResult<Vec<ResultRow>> {
        self.score_detailed(matrix).map(|report| report.rows)
    }

    /// Score and keep the intermediate matrices for inspection
    pub fn score_detailed(&self, matrix: &DecisionMatrix) -> ScoringResult<TopsisReport> {
        self.check_dimensions(matrix)?;

        let normalized = vector_normalize(matrix)?;
        let weighted = apply_weights(&normalized, &self.weights);

        let ideal = ideal_solutions(&weighted, &self.impacts);
        debug!("Ideal best: {:?}", ideal.best);
        debug!("Ideal worst: {:?}", ideal.worst);

        let distance_best = separation_distances(&weighted, &ideal.best);
        let distance_worst = separation_distances(&weighted, &ideal.worst);

        let scores = closeness_coefficients(&distance_best, &distance_worst)?;
        let ranks = competition_rank(&scores);

        let rows: Vec<ResultRow> = matrix
            .alternatives()
            .iter()
            .zip(matrix.rows())
            .zip(scores.iter().zip(&ranks))
            .map(|((label, values), (&score, &rank))| ResultRow {
                label: label.clone(),
                values: values.clone(),
                score,
                rank,
            })
            .collect();

        if let Some(top) = rows.iter().find(|row| row.rank == 1) {
            info!(
                "Scored {} alternatives across {} criteria (best: '{}', score {:.4})",
                matrix.n_alternatives(),
                matrix.n_criteria(),
                top.label,
                top.score
            );
        }

        Ok(TopsisReport {
            weighted,
            ideal,
            distance_best,
            distance_worst,
            rows,
        })
    }

    fn check_dimensions(&self, matrix: &DecisionMatrix) -> ScoringResult<()> {
        let criteria = matrix.n_criteria();
        if self.weights.len() != criteria || self.impacts.len() != criteria {
            return Err(ScoringError::DimensionMismatch {
                criteria,
                weights: self.weights.len(),
                impacts: self.impacts.len(),
            });
        }
        Ok(())
    }
}

/// Closeness to the ideal solution: `d_worst / (d_best + d_worst)`
///
/// # Errors
/// `UndefinedScore` when a row sits on both ideals at once (0/0). That only
/// happens when no criterion separates any two alternatives.
pub fn closeness_coefficients(
    distance_best: &[f64],
    distance_worst: &[f64],
) -> ScoringResult<Vec<f64>> {
    distance_best
        .iter()
        .zip(distance_worst)
        .enumerate()
        .map(|(row, (&best, &worst))| {
            let total = best + worst;
            if total == 0.0 {
                Err(ScoringError::UndefinedScore { row })
            } else {
                Ok(worst / total)
            }
        })
        .collect()
}

/// Score a matrix in one call
///
/// Equivalent to `TopsisScorer::new(weights, impacts).score(matrix)`.
pub fn compute(
    matrix: &DecisionMatrix,
    weights: &WeightVector,
    impacts: &ImpactVector,
) -> ScoringResult<Vec<ResultRow>> {
    TopsisScorer::new(weights.clone(), impacts.clone()).score(matrix)
}
