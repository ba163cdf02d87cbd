//! Portfolio-level correlation measures.

use super::{round_to, CorrelationMatrix};
use std::collections::BTreeMap;

/// Weight `1/n` for each code.
pub fn equal_weights(codes: &[String]) -> BTreeMap<String, f64> {
    let w = 1.0 / codes.len().max(1) as f64;
    codes.iter().map(|c| (c.clone(), w)).collect()
}

/// Weighted average pairwise correlation:
/// `Σ_{i≠j} w_i w_j c_ij / Σ_{i≠j} w_i w_j`.
///
/// Codes missing from the matrix and entries without a value are skipped.
/// `None` when nothing contributes a non-zero weight.
pub fn portfolio_correlation(
    weights: &BTreeMap<String, f64>,
    matrix: &CorrelationMatrix,
) -> Option<f64> {
    let known: Vec<(usize, f64)> = weights
        .iter()
        .filter_map(|(code, &w)| matrix.index_of(code).map(|i| (i, w)))
        .collect();

    let mut weighted = 0.0;
    let mut total = 0.0;
    for &(i, wi) in &known {
        for &(j, wj) in &known {
            if i == j {
                continue;
            }
            if let Some(c) = matrix.at(i, j) {
                weighted += wi * wj * c;
                total += wi * wj;
            }
        }
    }

    (total != 0.0).then(|| weighted / total)
}

/// `max(0, 1 - mean |c_ij|)` over the defined upper triangle, rounded to 3
/// places. 0 when no entry has a value.
pub fn diversification_score(matrix: &CorrelationMatrix) -> f64 {
    let values = matrix.off_diagonal_values();
    if values.is_empty() {
        return 0.0;
    }
    let mean_abs = values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64;
    round_to((1.0 - mean_abs).max(0.0), 3)
}
