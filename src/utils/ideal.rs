//! Ideal solutions and separation distances
//!
//! Stage 3 picks the most and least favourable weighted value of every criterion.
//! Stage 4 measures each alternative's Euclidean distance to both reference points.

use crate::types::{Impact, ImpactVector};

/// Per-criterion reference points over the weighted matrix
#[derive(Debug, Clone, PartialEq)]
pub struct IdealSolutions {
    /// Most favourable value per criterion (max if beneficial, min otherwise)
    pub best: Vec<f64>,
    /// Least favourable value per criterion
    pub worst: Vec<f64>,
}

/// Compute ideal best/worst for every criterion
pub fn ideal_solutions(weighted: &[Vec<f64>], impacts: &ImpactVector) -> IdealSolutions {
    let n = impacts.len();
    let mut col_max = vec![f64::NEG_INFINITY; n];
    let mut col_min = vec![f64::INFINITY; n];

    for row in weighted {
        for (j, &value) in row.iter().enumerate() {
            col_max[j] = col_max[j].max(value);
            col_min[j] = col_min[j].min(value);
        }
    }

    let (best, worst): (Vec<f64>, Vec<f64>) = impacts
        .as_slice()
        .iter()
        .zip(col_max.into_iter().zip(col_min))
        .map(|(impact, (max, min))| match impact {
            Impact::Beneficial => (max, min),
            Impact::NonBeneficial => (min, max),
        })
        .unzip();

    IdealSolutions { best, worst }
}

/// Euclidean distance of every row to a reference point
pub fn separation_distances(weighted: &[Vec<f64>], reference: &[f64]) -> Vec<f64> {
    weighted
        .iter()
        .map(|row| {
            row.iter()
                .zip(reference)
                .map(|(value, ideal)| (value - ideal).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ideal_solutions_respect_impacts() {
        let weighted = vec![vec![0.2, 0.9], vec![0.7, 0.1], vec![0.5, 0.5]];
        let impacts = ImpactVector::parse("+,-").unwrap();

        let ideal = ideal_solutions(&weighted, &impacts);

        assert_eq!(ideal.best, vec![0.7, 0.1]);
        assert_eq!(ideal.worst, vec![0.2, 0.9]);
    }

    #[test]
    fn test_separation_distances() {
        let weighted = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
        let distances = separation_distances(&weighted, &[3.0, 4.0]);
        assert_relative_eq!(distances[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(distances[1], 0.0, epsilon = 1e-12);
    }
}
