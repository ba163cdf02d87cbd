//! Rolling standard deviation.
//!
//! Population standard deviation over n closing prices.
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n-1) / n)
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{rolling, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn rolling_stddev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values.len(), period, |start, end| {
        let window = &values[start..=end];
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        Some(variance.sqrt())
    })
}

pub fn calculate_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::from_parts(
        IndicatorType::Stddev(period),
        bars.iter().map(|b| b.date),
        rolling_stddev(&closes, period)
            .into_iter()
            .map(|v| v.map(IndicatorValue::Simple)),
    )
}
