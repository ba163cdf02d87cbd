//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        if i < period - 1 {
            sum += v;
            out.push(None);
        } else if i == period - 1 {
            sum += v;
            ema = sum / period as f64;
            out.push(Some(ema));
        } else {
            ema = v * k + ema * (1.0 - k);
            out.push(Some(ema));
        }
    }

    out
}

/// EMA over an input with an undefined prefix (e.g. the MACD line).
///
/// The leading `None`s are skipped and the EMA is seeded from the first
/// `period` defined values. A `None` after the seed breaks the recurrence,
/// so everything from that point on is `None`.
pub fn ema_optional(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let offset = match values.iter().position(Option::is_some) {
        Some(i) => i,
        None => return vec![None; values.len()],
    };

    let mut out = vec![None; offset];
    let mut defined = Vec::with_capacity(values.len() - offset);
    for v in &values[offset..] {
        match v {
            Some(x) => defined.push(*x),
            None => break,
        }
    }

    out.extend(ema(&defined, period));
    out.resize(values.len(), None);
    out
}

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries::from_parts(
        IndicatorType::Ema(period),
        bars.iter().map(|b| b.date),
        ema(&closes, period)
            .into_iter()
            .map(|v| v.map(IndicatorValue::Simple)),
    )
}
