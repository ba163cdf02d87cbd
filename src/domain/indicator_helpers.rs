//! Indicator set computation and latest-value extraction.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::indicator::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stddev, calculate_stochastic, calculate_williams_r, IndicatorSeries, IndicatorType,
    IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;
use serde::Serialize;
use std::collections::HashMap;

/// All indicator series computed for one security, keyed by type.
pub type IndicatorSet = HashMap<IndicatorType, IndicatorSeries>;

pub fn calculate_indicator(bars: &[OhlcvBar], indicator_type: &IndicatorType) -> IndicatorSeries {
    match *indicator_type {
        IndicatorType::Sma(period) => calculate_sma(bars, period),
        IndicatorType::Ema(period) => calculate_ema(bars, period),
        IndicatorType::Rsi(period) => calculate_rsi(bars, period),
        IndicatorType::Stddev(period) => calculate_stddev(bars, period),
        IndicatorType::WilliamsR(period) => calculate_williams_r(bars, period),
        IndicatorType::Macd { fast, slow, signal } => calculate_macd(bars, fast, slow, signal),
        IndicatorType::Stochastic { k_period, d_period } => {
            calculate_stochastic(bars, k_period, d_period)
        }
        IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        } => calculate_bollinger(bars, period, stddev_mult_x100 as f64 / 100.0),
    }
}

pub fn compute_indicators(bars: &[OhlcvBar], indicator_types: &[IndicatorType]) -> IndicatorSet {
    indicator_types
        .iter()
        .map(|t| (t.clone(), calculate_indicator(bars, t)))
        .collect()
}

/// The momentum indicator types for a config, in report order.
pub fn momentum_indicator_types(config: &AnalysisConfig) -> Vec<IndicatorType> {
    vec![
        IndicatorType::Rsi(config.rsi_period),
        IndicatorType::Macd {
            fast: config.macd_fast,
            slow: config.macd_slow,
            signal: config.macd_signal,
        },
        IndicatorType::Sma(config.sma_short),
        IndicatorType::Sma(config.sma_long),
        IndicatorType::bollinger(config.bb_period, config.bb_std),
        IndicatorType::Stochastic {
            k_period: config.stoch_k,
            d_period: config.stoch_d,
        },
        IndicatorType::WilliamsR(config.williams_period),
    ]
}

/// Latest value of every momentum indicator; `None` where the final bar has no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatestIndicators {
    pub price: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub williams_r: Option<f64>,
}

impl LatestIndicators {
    pub fn from_set(bars: &[OhlcvBar], set: &IndicatorSet, config: &AnalysisConfig) -> Self {
        let latest = |t: &IndicatorType| set.get(t).and_then(IndicatorSeries::latest);
        let simple = |t: IndicatorType| latest(&t).and_then(|v| v.as_simple());

        let mut out = LatestIndicators {
            price: bars.last().map(|b| b.close),
            rsi: simple(IndicatorType::Rsi(config.rsi_period)),
            sma_short: simple(IndicatorType::Sma(config.sma_short)),
            sma_long: simple(IndicatorType::Sma(config.sma_long)),
            williams_r: simple(IndicatorType::WilliamsR(config.williams_period)),
            ..Default::default()
        };

        let macd_type = IndicatorType::Macd {
            fast: config.macd_fast,
            slow: config.macd_slow,
            signal: config.macd_signal,
        };
        if let Some(IndicatorValue::Macd {
            line,
            signal,
            histogram,
        }) = latest(&macd_type)
        {
            out.macd = Some(line);
            out.macd_signal = signal;
            out.macd_histogram = histogram;
        }

        if let Some(IndicatorValue::Bollinger {
            upper,
            middle,
            lower,
        }) = latest(&IndicatorType::bollinger(config.bb_period, config.bb_std))
        {
            out.bb_upper = Some(upper);
            out.bb_middle = Some(middle);
            out.bb_lower = Some(lower);
        }

        let stoch_type = IndicatorType::Stochastic {
            k_period: config.stoch_k,
            d_period: config.stoch_d,
        };
        if let Some(IndicatorValue::Stochastic { k, d }) = latest(&stoch_type) {
            out.stoch_k = Some(k);
            out.stoch_d = d;
        }

        out
    }
}
