//! Typed inputs and outputs of the scorer
//!
//! Every input type validates on construction, so the scorer only ever sees
//! rectangular, finite matrices and well-formed weight/impact vectors.

use crate::error::{ScoringError, ScoringResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Alternatives × criteria table of finite values
///
/// Owns the criterion names (column headers) and one label per alternative.
/// Labels are carried through to the results and never used in computation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DecisionMatrix {
    /// Build a matrix from labelled rows
    ///
    /// # Errors
    /// - `InsufficientColumns` if fewer than 2 criteria are named
    /// - `EmptyMatrix` if there are no rows
    /// - `RaggedRow` if a row's length differs from the number of criteria
    /// - `NonNumericCriteria` naming every column that holds a NaN or infinite value
    pub fn new(criteria: Vec<String>, rows: Vec<(String, Vec<f64>)>) -> ScoringResult<Self> {
        let n = criteria.len();
        if n < 2 {
            return Err(ScoringError::InsufficientColumns { found: n });
        }
        if rows.is_empty() {
            return Err(ScoringError::EmptyMatrix);
        }

        let mut non_finite = vec![false; n];
        for (row_idx, (_, values)) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(ScoringError::RaggedRow {
                    row: row_idx,
                    expected: n,
                    found: values.len(),
                });
            }
            for (flag, value) in non_finite.iter_mut().zip(values) {
                if !value.is_finite() {
                    *flag = true;
                }
            }
        }

        let offending: Vec<String> = criteria
            .iter()
            .zip(&non_finite)
            .filter(|(_, bad)| **bad)
            .map(|(name, _)| name.clone())
            .collect();
        if !offending.is_empty() {
            return Err(ScoringError::NonNumericCriteria(offending));
        }

        let (alternatives, rows): (Vec<String>, Vec<Vec<f64>>) = rows.into_iter().unzip();
        Ok(Self { alternatives, criteria, rows })
    }

    /// Build a matrix with generated labels (`A1..Am`) and criterion names (`C1..Cn`)
    pub fn from_values(rows: Vec<Vec<f64>>) -> ScoringResult<Self> {
        let n = rows.first().map_or(0, Vec::len);
        let criteria = (1..=n).map(|j| format!("C{}", j)).collect();
        let labelled = rows
            .into_iter()
            .enumerate()
            .map(|(i, values)| (format!("A{}", i + 1), values))
            .collect();
        Self::new(criteria, labelled)
    }

    pub fn n_alternatives(&self) -> usize {
        self.rows.len()
    }

    pub fn n_criteria(&self) -> usize {
        self.criteria.len()
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Relative importance of each criterion
///
/// Weights need not sum to 1; only their ratios affect the scores.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    pub fn new(weights: Vec<f64>) -> ScoringResult<Self> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ScoringError::InvalidWeight(bad.to_string()));
        }
        Ok(Self(weights))
    }

    /// Parse a comma-separated list such as `"1,1,2,0.5"`
    pub fn parse(input: &str) -> ScoringResult<Self> {
        let weights = input
            .split(',')
            .map(|token| {
                let token = token.trim();
                match token.parse::<f64>() {
                    Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
                    _ => Err(ScoringError::InvalidWeight(token.to_string())),
                }
            })
            .collect::<ScoringResult<Vec<f64>>>()?;
        Ok(Self(weights))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Direction of preference for a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Higher values are better
    Beneficial,
    /// Lower values are better
    NonBeneficial,
}

impl FromStr for Impact {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token == "+" || token.eq_ignore_ascii_case("max") {
            Ok(Impact::Beneficial)
        } else if token == "-" || token.eq_ignore_ascii_case("min") {
            Ok(Impact::NonBeneficial)
        } else {
            Err(ScoringError::InvalidImpactSymbol(token.to_string()))
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::Beneficial => write!(f, "+"),
            Impact::NonBeneficial => write!(f, "-"),
        }
    }
}

/// One impact per criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactVector(Vec<Impact>);

impl ImpactVector {
    pub fn new(impacts: Vec<Impact>) -> Self {
        Self(impacts)
    }

    /// Parse a comma-separated list such as `"+,+,-,max,min"`
    pub fn parse(input: &str) -> ScoringResult<Self> {
        input
            .split(',')
            .map(str::parse)
            .collect::<ScoringResult<Vec<Impact>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }
}

/// Score and rank of one alternative, in input row order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub values: Vec<f64>,
    /// TOPSIS closeness coefficient (0-1, HIGH = GOOD)
    pub score: f64,
    /// Competition rank (1 = best, ties share a rank)
    pub rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_requires_two_criteria() {
        let err = DecisionMatrix::new(
            vec!["Price".to_string()],
            vec![("M1".to_string(), vec![250.0])],
        )
        .unwrap_err();
        assert_eq!(err, ScoringError::InsufficientColumns { found: 1 });
    }

    #[test]
    fn test_matrix_rejects_empty_and_ragged() {
        assert_eq!(
            DecisionMatrix::from_values(vec![]).unwrap_err(),
            ScoringError::InsufficientColumns { found: 0 }
        );

        let criteria = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            DecisionMatrix::new(criteria.clone(), vec![]).unwrap_err(),
            ScoringError::EmptyMatrix
        );

        let err = DecisionMatrix::new(
            criteria,
            vec![
                ("x".to_string(), vec![1.0, 2.0]),
                ("y".to_string(), vec![1.0]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ScoringError::RaggedRow { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn test_matrix_reports_all_non_finite_columns() {
        let criteria = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let err = DecisionMatrix::new(
            criteria,
            vec![
                ("x".to_string(), vec![f64::NAN, 1.0, 2.0]),
                ("y".to_string(), vec![1.0, 1.0, f64::INFINITY]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScoringError::NonNumericCriteria(vec!["a".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_from_values_generates_labels() {
        let matrix = DecisionMatrix::from_values(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.alternatives(), ["A1", "A2"]);
        assert_eq!(matrix.criteria(), ["C1", "C2"]);
        assert_eq!(matrix.n_alternatives(), 2);
        assert_eq!(matrix.n_criteria(), 2);
    }

    #[test]
    fn test_weight_parsing() {
        let weights = WeightVector::parse("1, 1,2 ,0.5").unwrap();
        assert_eq!(weights.as_slice(), &[1.0, 1.0, 2.0, 0.5]);

        assert_eq!(
            WeightVector::parse("1,abc,1").unwrap_err(),
            ScoringError::InvalidWeight("abc".to_string())
        );
        assert_eq!(
            WeightVector::parse("1,-2").unwrap_err(),
            ScoringError::InvalidWeight("-2".to_string())
        );
        assert_eq!(
            WeightVector::parse("1,,1").unwrap_err(),
            ScoringError::InvalidWeight(String::new())
        );
        assert!(WeightVector::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_impact_parsing() {
        let impacts = ImpactVector::parse("+,-,max,MIN, + ").unwrap();
        assert_eq!(
            impacts.as_slice(),
            &[
                Impact::Beneficial,
                Impact::NonBeneficial,
                Impact::Beneficial,
                Impact::NonBeneficial,
                Impact::Beneficial,
            ]
        );

        assert_eq!(
            ImpactVector::parse("+,up,-").unwrap_err(),
            ScoringError::InvalidImpactSymbol("up".to_string())
        );
        assert_eq!(Impact::NonBeneficial.to_string(), "-");
    }
}
