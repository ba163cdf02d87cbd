//! Daily OHLCV bars and validated price series.

use crate::domain::error::StockwatchError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub code: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// One security's bars, dates strictly ascending and closes positive.
///
/// Read-only once constructed; every analytic takes it by reference.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    code: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Validate `bars` into a series. An empty vector is a valid (empty) series.
    pub fn new(code: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, StockwatchError> {
        let code = code.into();

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(StockwatchError::MalformedSeries {
                    code,
                    reason: format!("non-positive close {} on {}", bar.close, bar.date),
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(StockwatchError::MalformedSeries {
                    code,
                    reason: format!(
                        "dates not strictly ascending at index {} ({} after {})",
                        i,
                        bar.date,
                        bars[i - 1].date
                    ),
                });
            }
        }

        Ok(Self { code, bars })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// The most recent `n` bars as a new series (all bars if `n` exceeds the length).
    pub fn tail(&self, n: usize) -> PriceSeries {
        let start = self.bars.len().saturating_sub(n);
        PriceSeries {
            code: self.code.clone(),
            bars: self.bars[start..].to_vec(),
        }
    }
}
