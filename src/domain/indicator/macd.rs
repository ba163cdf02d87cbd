//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: the line needs max(fast, slow) - 1 bars, the signal another signal - 1.
//! A bar-level point exists as soon as the line does.

use crate::domain::indicator::ema::{ema, ema_optional};
use crate::domain::indicator::{IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three MACD lines, each aligned to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdLines {
    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let signal = if signal_period == 0 {
        vec![None; closes.len()]
    } else {
        ema_optional(&line, signal_period)
    };

    let histogram = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| Some((*l)? - (*s)?))
        .collect();

    MacdLines {
        line,
        signal,
        histogram,
    }
}

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let lines = macd(&closes, fast, slow, signal_period);

    let values = (0..bars.len()).map(|i| {
        Some(IndicatorValue::Macd {
            line: lines.line[i]?,
            signal: lines.signal[i],
            histogram: lines.histogram[i],
        })
    });

    IndicatorSeries::from_parts(
        IndicatorType::Macd {
            fast,
            slow,
            signal: signal_period,
        },
        bars.iter().map(|b| b.date),
        values,
    )
}

pub fn calculate_macd_default(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
