//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 and avg_gain > 0: RSI = 100. If both are 0 the bar has no value.
//!
//! Warmup: first n bars are undefined (need n price changes to compute the initial average).

use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut values = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return values;
    }

    let mut gains: Vec<f64> = Vec::with_capacity(closes.len() - 1);
    let mut losses: Vec<f64> = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    values[period] = rsi_from_averages(avg_gain, avg_loss);

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        values[i + 1] = rsi_from_averages(avg_gain, avg_loss);
    }

    values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { None } else { Some(100.0) }
    } else {
        Some(100.0 - (100.0 / (1.0 + avg_gain / avg_loss)))
    }
}

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::from_parts(
        IndicatorType::Rsi(period),
        bars.iter().map(|b| b.date),
        rsi(&closes, period)
            .into_iter()
            .map(|v| v.map(IndicatorValue::Simple)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use proptest::prelude::*;

    #[test]
    fn rsi_empty_bars() {
        let series = calculate_rsi(&[], 14);
        assert_eq!(series.values.len(), 0);
    }

    #[test]
    fn rsi_single_bar() {
        let series = calculate_rsi(&make_bars(&[100.0]), 14);
        assert_eq!(series.values.len(), 1);
        assert!(series.values[0].value.is_none());
    }

    #[test]
    fn rsi_warmup_period() {
        let prices: Vec<f64> = (1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0).collect();
        let out = rsi(&prices, 14);

        assert_eq!(out.len(), 15);
        for (i, v) in out.iter().enumerate().take(14) {
            assert!(v.is_none(), "Bar {} should be undefined", i);
        }
        assert!(out[14].is_some(), "Bar 14 should be defined");
    }

    #[test]
    fn rsi_all_gains_no_losses() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let out = rsi(&prices, 14);
        assert!((out[14].unwrap() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_no_gains() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let out = rsi(&prices, 14);
        assert!(out[14].unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_series_has_no_value() {
        let out = rsi(&[50.0; 20], 14);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_rising_twenty_bars_is_overbought() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64 * 0.5).collect();
        let out = rsi(&prices, 14);
        assert!(out[19].unwrap() > 70.0);
    }

    #[test]
    fn rsi_zero_period() {
        let out = rsi(&[100.0, 101.0], 0);
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // period 2: changes +2, -1, +3
        let out = rsi(&[10.0, 12.0, 11.0, 14.0], 2);
        // seed: gain 1.0, loss 0.5 -> RS 2 -> 66.67
        assert!((out[2].unwrap() - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
        // next: gain (1*1+3)/2 = 2, loss (0.5*1+0)/2 = 0.25 -> RS 8
        assert!((out[3].unwrap() - (100.0 - 100.0 / 9.0)).abs() < 1e-10);
    }

    #[test]
    fn rsi_known_calculation() {
        let prices = [
            44.0, 44.25, 44.50, 43.75, 44.50, 44.25, 44.75, 45.25, 45.50, 45.25, 45.50, 46.0,
            46.25, 46.0, 46.50,
        ];
        let series = calculate_rsi(&make_bars(&prices), 14);

        match series.values[14].value {
            Some(IndicatorValue::Simple(v)) => {
                assert!(v > 50.0 && v < 100.0, "RSI should be in bullish territory")
            }
            other => panic!("Expected Simple value, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn rsi_defined_values_in_range(prices in prop::collection::vec(1.0f64..1000.0, 0..80)) {
            for v in rsi(&prices, 14).into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&v), "RSI {} out of range", v);
            }
        }
    }
}
