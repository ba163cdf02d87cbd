//! Per-security momentum analysis: indicators in, signals out.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::indicator_helpers::{
    compute_indicators, momentum_indicator_types, IndicatorSet, LatestIndicators,
};
use crate::domain::ohlcv::PriceSeries;
use crate::domain::signal::{bollinger_signal, ma_signal, macd_signal, rsi_signal, SignalVector};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumResult {
    pub code: String,
    pub indicators: LatestIndicators,
    pub signals: SignalVector,
}

/// Classify latest indicator values into a [`SignalVector`].
pub fn synthesize_signals(latest: &LatestIndicators) -> SignalVector {
    SignalVector::new(
        rsi_signal(latest.rsi),
        macd_signal(latest.macd, latest.macd_signal),
        ma_signal(latest.price, latest.sma_short, latest.sma_long),
        bollinger_signal(latest.price, latest.bb_upper, latest.bb_lower),
    )
}

/// Full indicator set for a series under `config`.
pub fn indicator_set(series: &PriceSeries, config: &AnalysisConfig) -> IndicatorSet {
    compute_indicators(series.bars(), &momentum_indicator_types(config))
}

/// Analyze one security. Total: an empty or short series yields no-value
/// indicators and NEUTRAL signals.
pub fn analyze_momentum(series: &PriceSeries, config: &AnalysisConfig) -> MomentumResult {
    let set = indicator_set(series, config);
    let indicators = LatestIndicators::from_set(series.bars(), &set, config);
    let signals = synthesize_signals(&indicators);

    MomentumResult {
        code: series.code().to_string(),
        indicators,
        signals,
    }
}
