//! Stochastic Oscillator.
//!
//! %K = 100 × (C - LL(k)) / (HH(k) - LL(k))
//! %D = SMA(%K, d)
//!
//! A window with no range (HH == LL) has no %K, and any %D window touching it
//! has no %D. Defaults: k=14, d=3.

use crate::domain::indicator::sma::sma_optional;
use crate::domain::indicator::{rolling, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticLines {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Highest high and lowest low over `[start, end]`.
pub(crate) fn window_range(highs: &[f64], lows: &[f64], start: usize, end: usize) -> (f64, f64) {
    let hh = highs[start..=end]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let ll = lows[start..=end].iter().copied().fold(f64::INFINITY, f64::min);
    (hh, ll)
}

pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticLines {
    let len = closes.len().min(highs.len()).min(lows.len());

    let k = rolling(len, k_period, |start, end| {
        let (hh, ll) = window_range(highs, lows, start, end);
        let range = hh - ll;
        if range == 0.0 {
            return None;
        }
        Some(100.0 * (closes[end] - ll) / range)
    });
    let d = sma_optional(&k, d_period);

    StochasticLines { k, d }
}

pub fn calculate_stochastic(bars: &[OhlcvBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let lines = stochastic(&highs, &lows, &closes, k_period, d_period);

    let values = (0..bars.len()).map(|i| {
        Some(IndicatorValue::Stochastic {
            k: lines.k[i]?,
            d: lines.d[i],
        })
    });

    IndicatorSeries::from_parts(
        IndicatorType::Stochastic { k_period, d_period },
        bars.iter().map(|b| b.date),
        values,
    )
}
