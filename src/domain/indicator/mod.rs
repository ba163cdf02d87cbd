//! Technical indicator implementations.
//!
//! Every indicator exists in two forms:
//! - a pure function over ordered numeric slices returning an aligned
//!   `Vec<Option<f64>>` (`None` = no value for that bar);
//! - a `calculate_*` wrapper over bars that attaches dates and an
//!   [`IndicatorType`], producing an [`IndicatorSeries`].
//!
//! Types:
//! - `IndicatorPoint`: a single dated point, value absent during warmup
//! - `IndicatorValue`: enum for the different indicator output shapes
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: a time series of indicator values

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod williams_r;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::calculate_stddev;
pub use stochastic::calculate_stochastic;
pub use williams_r::calculate_williams_r;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<IndicatorValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    /// Defined once the MACD line is; signal and histogram warm up later.
    Macd {
        line: f64,
        signal: Option<f64>,
        histogram: Option<f64>,
    },
    /// Defined once %K is; %D trails by `d_period - 1` bars.
    Stochastic {
        k: f64,
        d: Option<f64>,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

impl IndicatorValue {
    /// The scalar for `Simple` values; `None` for multi-line shapes.
    pub fn as_simple(&self) -> Option<f64> {
        match self {
            IndicatorValue::Simple(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Stddev(usize),
    WilliamsR(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

impl IndicatorType {
    /// Bollinger key for a fractional multiplier (stored in hundredths so the type stays `Hash`).
    pub fn bollinger(period: usize, stddev_mult: f64) -> Self {
        IndicatorType::Bollinger {
            period,
            stddev_mult_x100: (stddev_mult * 100.0).round().max(0.0) as u32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub(crate) fn from_parts(
        indicator_type: IndicatorType,
        dates: impl IntoIterator<Item = NaiveDate>,
        values: impl IntoIterator<Item = Option<IndicatorValue>>,
    ) -> Self {
        let values = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| IndicatorPoint { date, value })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    /// Value on the final bar, if that bar has one.
    pub fn latest(&self) -> Option<IndicatorValue> {
        self.values.last().and_then(|p| p.value)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.value.is_some()).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::WilliamsR(period) => write!(f, "WILLIAMS_R({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}

/// Sliding-window helper shared by the rolling indicators: `f` sees each full
/// window ending at index `i`; the first `period - 1` slots are `None`.
pub(crate) fn rolling<F>(len: usize, period: usize, mut f: F) -> Vec<Option<f64>>
where
    F: FnMut(usize, usize) -> Option<f64>,
{
    if period == 0 {
        return vec![None; len];
    }
    (0..len)
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                f(i + 1 - period, i)
            }
        })
        .collect()
}
