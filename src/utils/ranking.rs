//! Competition ranking ("1224" ranking)
//!
//! Rank 1 goes to the highest score. Equal scores share the rank of the first
//! position they occupy in descending order, and the next distinct score skips
//! ahead by the size of the tie group:
//!
//! ```text
//! rank(x) = 1 + |{ s : s > x }|
//! ```

use std::cmp::Ordering;

/// Rank scores descending with competition-style ties
///
/// Returns ranks in the same order as the input. Scores are compared exactly;
/// values that differ only in the last bit do not tie.
pub fn competition_rank(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0u32; scores.len()];
    let mut current_rank = 1u32;
    let mut previous: Option<f64> = None;

    for (position, &idx) in order.iter().enumerate() {
        let score = scores[idx];
        if previous != Some(score) {
            current_rank = position as u32 + 1;
            previous = Some(score);
        }
        ranks[idx] = current_rank;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_scores() {
        assert_eq!(competition_rank(&[0.3, 0.9, 0.5]), vec![3, 1, 2]);
    }

    #[test]
    fn test_ties_share_rank_and_skip() {
        // Two rows tied for best, next distinct row gets rank 3
        assert_eq!(competition_rank(&[0.8, 0.5, 0.8, 0.1]), vec![1, 3, 1, 4]);
        // Tie in the middle
        assert_eq!(competition_rank(&[0.9, 0.4, 0.4, 0.4, 0.2]), vec![1, 2, 2, 2, 5]);
    }

    #[test]
    fn test_matches_counting_definition() {
        let scores = [0.5342, 0.3083, 0.6916, 0.5342, 0.4010, 0.3083];
        let ranks = competition_rank(&scores);
        for (i, &x) in scores.iter().enumerate() {
            let expected = 1 + scores.iter().filter(|&&s| s > x).count() as u32;
            assert_eq!(ranks[i], expected);
        }
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(competition_rank(&[0.42]), vec![1]);
        assert!(competition_rank(&[]).is_empty());
    }
}
