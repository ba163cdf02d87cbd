//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{rolling, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values.len(), period, |start, end| {
        Some(values[start..=end].iter().sum::<f64>() / period as f64)
    })
}

/// SMA over an optional input: a window containing any `None` is `None`.
pub fn sma_optional(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values.len(), period, |start, end| {
        let window = &values[start..=end];
        let sum = window.iter().copied().sum::<Option<f64>>()?;
        Some(sum / period as f64)
    })
}

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::from_parts(
        IndicatorType::Sma(period),
        bars.iter().map(|b| b.date),
        sma(&closes, period)
            .into_iter()
            .map(|v| v.map(IndicatorValue::Simple)),
    )
}
