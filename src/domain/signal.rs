//! Categorical momentum signals and their aggregation.
//!
//! Every rule is total: a missing input ("no value") classifies as
//! [`Signal::Neutral`].

use serde::Serialize;
use std::fmt;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// RSI above 70 is overbought (SELL), below 30 oversold (BUY).
pub fn rsi_signal(rsi: Option<f64>) -> Signal {
    match rsi {
        Some(v) if v > RSI_OVERBOUGHT => Signal::Sell,
        Some(v) if v < RSI_OVERSOLD => Signal::Buy,
        _ => Signal::Neutral,
    }
}

pub fn macd_signal(line: Option<f64>, signal: Option<f64>) -> Signal {
    match (line, signal) {
        (Some(l), Some(s)) if l > s => Signal::Buy,
        (Some(l), Some(s)) if l < s => Signal::Sell,
        _ => Signal::Neutral,
    }
}

/// BUY on price > short > long, SELL on price < short < long.
pub fn ma_signal(price: Option<f64>, sma_short: Option<f64>, sma_long: Option<f64>) -> Signal {
    match (price, sma_short, sma_long) {
        (Some(p), Some(s), Some(l)) if p > s && s > l => Signal::Buy,
        (Some(p), Some(s), Some(l)) if p < s && s < l => Signal::Sell,
        _ => Signal::Neutral,
    }
}

/// Close above the upper band is SELL, below the lower band BUY.
pub fn bollinger_signal(price: Option<f64>, upper: Option<f64>, lower: Option<f64>) -> Signal {
    match (price, upper, lower) {
        (Some(p), Some(u), _) if p > u => Signal::Sell,
        (Some(p), Some(_), Some(l)) if p < l => Signal::Buy,
        _ => Signal::Neutral,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalVector {
    pub rsi: Signal,
    pub macd: Signal,
    pub ma: Signal,
    pub bollinger: Signal,
    pub overall_signal: Signal,
    pub strength: f64,
}

impl SignalVector {
    pub fn new(rsi: Signal, macd: Signal, ma: Signal, bollinger: Signal) -> Self {
        let (overall_signal, strength) = aggregate(&[rsi, macd, ma, bollinger]);
        Self {
            rsi,
            macd,
            ma,
            bollinger,
            overall_signal,
            strength,
        }
    }

    pub fn components(&self) -> [Signal; 4] {
        [self.rsi, self.macd, self.ma, self.bollinger]
    }
}

/// Majority verdict and strength over component signals.
///
/// strength = |buy - sell| / max(N - 1, 1). The N - 1 divisor is kept as is:
/// with four components a 2-vs-1 split scores 1/3 and a unanimous BUY scores 4/3
/// before clamping to 1.
pub fn aggregate(signals: &[Signal]) -> (Signal, f64) {
    let buys = signals.iter().filter(|s| **s == Signal::Buy).count();
    let sells = signals.iter().filter(|s| **s == Signal::Sell).count();

    let overall = match buys.cmp(&sells) {
        std::cmp::Ordering::Greater => Signal::Buy,
        std::cmp::Ordering::Less => Signal::Sell,
        std::cmp::Ordering::Equal => Signal::Neutral,
    };

    let divisor = signals.len().saturating_sub(1).max(1) as f64;
    let strength = (buys.abs_diff(sells) as f64 / divisor).min(1.0);

    (overall, strength)
}
