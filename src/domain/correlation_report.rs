//! Correlation report over a set of securities.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::correlation::{
    correlation_matrix, diversification_score, equal_weights, find_highly_correlated_pairs,
    portfolio_correlation, round_to, CorrelatedPair, CorrelationMatrix,
};
use crate::domain::ohlcv::PriceSeries;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub analysis_date: String,
    pub stocks_analyzed: Vec<String>,
    pub correlation_matrix: CorrelationMatrix,
    pub highly_correlated_pairs: Vec<CorrelatedPair>,
    pub portfolio_average_correlation: Option<f64>,
    pub diversification_score: f64,
    pub summary: String,
}

/// Build the correlation report for `series`.
///
/// The matrix is rounded to 3 places. At most `config.max_reported_pairs`
/// pairs are listed; the summary counts all of them. Portfolio correlation
/// uses equal weights over every analyzed code.
pub fn generate_correlation_report(
    series: &[&PriceSeries],
    config: &AnalysisConfig,
    analysis_date: &str,
) -> CorrelationReport {
    let matrix = correlation_matrix(series);
    let pairs =
        find_highly_correlated_pairs(&matrix, config.min_correlation, config.strong_correlation);

    let codes: Vec<String> = series.iter().map(|s| s.code().to_string()).collect();
    let portfolio = portfolio_correlation(&equal_weights(&codes), &matrix).map(|c| round_to(c, 3));

    let summary = correlation_summary(matrix.len(), &pairs);
    let highly_correlated_pairs = pairs
        .into_iter()
        .take(config.max_reported_pairs)
        .map(|p| CorrelatedPair {
            correlation: round_to(p.correlation, 3),
            ..p
        })
        .collect();

    CorrelationReport {
        analysis_date: analysis_date.to_string(),
        stocks_analyzed: codes,
        diversification_score: diversification_score(&matrix),
        correlation_matrix: matrix.rounded(3),
        highly_correlated_pairs,
        portfolio_average_correlation: portfolio,
        summary,
    }
}

/// One-paragraph description of the pair scan.
pub fn correlation_summary(stock_count: usize, pairs: &[CorrelatedPair]) -> String {
    let total_pairs = stock_count * stock_count.saturating_sub(1) / 2;
    let mut summary = format!(
        "Analyzed {} stocks with {} possible pairs. ",
        stock_count, total_pairs
    );

    let max_abs = pairs.iter().map(|p| p.correlation.abs()).reduce(f64::max);
    match max_abs {
        Some(max) if total_pairs > 0 => {
            let pct = pairs.len() as f64 / total_pairs as f64 * 100.0;
            summary.push_str(&format!(
                "Found {} highly correlated pairs ({:.1}% of all pairs). Highest absolute correlation: {:.3}.",
                pairs.len(),
                pct,
                max
            ));
        }
        _ => summary.push_str("No significant highly correlated pairs found."),
    }
    summary
}
