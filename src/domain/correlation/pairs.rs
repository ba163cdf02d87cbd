//! Highly correlated pair detection.

use super::CorrelationMatrix;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PairStrength {
    Strong,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub stock1: String,
    pub stock2: String,
    pub correlation: f64,
    pub strength: PairStrength,
}

/// Upper-triangle pairs with `|corr| >= threshold`, sorted by descending
/// `|corr|`. Ties keep row-major matrix order. A pair is `Strong` when
/// `|corr| > strong_threshold`.
pub fn find_highly_correlated_pairs(
    matrix: &CorrelationMatrix,
    threshold: f64,
    strong_threshold: f64,
) -> Vec<CorrelatedPair> {
    let codes = matrix.codes();
    let mut pairs: Vec<CorrelatedPair> = matrix
        .upper_triangle()
        .filter_map(|(i, j, value)| {
            let correlation = value?;
            if correlation.abs() < threshold {
                return None;
            }
            let strength = if correlation.abs() > strong_threshold {
                PairStrength::Strong
            } else {
                PairStrength::Moderate
            };
            Some(CorrelatedPair {
                stock1: codes[i].clone(),
                stock2: codes[j].clone(),
                correlation,
                strength,
            })
        })
        .collect();

    pairs.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    pairs
}
