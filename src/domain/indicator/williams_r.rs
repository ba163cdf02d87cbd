//! Williams %R.
//!
//! %R = -100 × (HH(n) - C) / (HH(n) - LL(n)), in [-100, 0].
//! Warmup: first (n-1) bars. A flat window has no value. Default n=14.

use crate::domain::indicator::stochastic::window_range;
use crate::domain::indicator::{rolling, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = closes.len().min(highs.len()).min(lows.len());
    rolling(len, period, |start, end| {
        let (hh, ll) = window_range(highs, lows, start, end);
        let range = hh - ll;
        if range == 0.0 {
            return None;
        }
        Some(-100.0 * (hh - closes[end]) / range)
    })
}

pub fn calculate_williams_r(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    IndicatorSeries::from_parts(
        IndicatorType::WilliamsR(period),
        bars.iter().map(|b| b.date),
        williams_r(&highs, &lows, &closes, period)
            .into_iter()
            .map(|v| v.map(IndicatorValue::Simple)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_hlc_bars;

    #[test]
    fn williams_close_at_high_is_zero() {
        let out = williams_r(&[10.0, 12.0], &[8.0, 9.0], &[9.0, 12.0], 2);
        assert!(out[0].is_none());
        assert!(out[1].unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn williams_close_at_low_is_minus_100() {
        let out = williams_r(&[10.0, 12.0], &[8.0, 9.0], &[9.0, 8.0], 2);
        assert!((out[1].unwrap() + 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn williams_midpoint() {
        // HH 20, LL 10, close 15 -> -50
        let out = williams_r(&[20.0, 18.0], &[12.0, 10.0], &[14.0, 15.0], 2);
        assert!((out[1].unwrap() + 50.0).abs() < 1e-12);
    }

    #[test]
    fn williams_flat_window() {
        let out = williams_r(&[5.0; 3], &[5.0; 3], &[5.0; 3], 2);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn calculate_williams_r_range() {
        let rows: Vec<(f64, f64, f64)> = (0..25)
            .map(|i| {
                let base = 50.0 + (i as f64 * 0.9).cos() * 3.0;
                (base + 0.5, base - 0.5, base)
            })
            .collect();
        let series = calculate_williams_r(&make_hlc_bars(&rows), 14);

        assert_eq!(series.indicator_type, IndicatorType::WilliamsR(14));
        assert_eq!(series.defined_count(), 25 - 13);
        for point in &series.values {
            if let Some(IndicatorValue::Simple(v)) = point.value {
                assert!((-100.0..=0.0).contains(&v));
            }
        }
    }
}
