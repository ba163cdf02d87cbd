//! Two-security relationship report: rolling correlation, breakdowns, beta.

use crate::domain::correlation::{
    beta, detect_breakdowns, round_to, rolling_correlation, CorrelationBreakdown, RollingPoint,
};
use crate::domain::ohlcv::PriceSeries;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairAnalysis {
    pub first: String,
    pub second: String,
    pub window: usize,
    pub breakdown_threshold: f64,
    pub latest_correlation: Option<f64>,
    /// Beta of `first` against `second`.
    pub beta: Option<f64>,
    pub breakdowns: Vec<CorrelationBreakdown>,
    pub rolling_correlation: Vec<RollingPoint>,
}

pub fn analyze_pair(
    first: &PriceSeries,
    second: &PriceSeries,
    window: usize,
    breakdown_threshold: f64,
) -> PairAnalysis {
    let rolling = rolling_correlation(first, second, window);
    let breakdowns = detect_breakdowns(&rolling, breakdown_threshold);

    PairAnalysis {
        first: first.code().to_string(),
        second: second.code().to_string(),
        window,
        breakdown_threshold,
        latest_correlation: rolling
            .last()
            .and_then(|p| p.correlation)
            .map(|c| round_to(c, 3)),
        beta: beta(first, second).map(|b| round_to(b, 3)),
        breakdowns,
        rolling_correlation: rolling,
    }
}
