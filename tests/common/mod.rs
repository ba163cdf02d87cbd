#![allow(dead_code)]

use chrono::NaiveDate;
use stockwatch::domain::error::StockwatchError;
pub use stockwatch::domain::ohlcv::OhlcvBar;
use stockwatch::domain::ohlcv::PriceSeries;
use stockwatch::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, StockwatchError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(StockwatchError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) => Ok(bars
                .iter()
                .filter(|b| b.date >= start_date && b.date <= end_date)
                .cloned()
                .collect()),
            None => Err(StockwatchError::NoData {
                code: code.to_string(),
            }),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockwatchError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockwatchError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(StockwatchError::DataSource {
                reason: reason.clone(),
            });
        }
        match self.data.get(code) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(code: &str, date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        code: code.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000,
    }
}

/// Daily bars from a close path, starting at `start_date`.
pub fn bars_from_closes(code: &str, start_date: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            code: code.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 1000,
        })
        .collect()
}

/// Compounding path: `start_price * (1 + rate)^i`.
pub fn trending_closes(count: usize, start_price: f64, rate: f64) -> Vec<f64> {
    (0..count)
        .map(|i| start_price * (1.0 + rate).powi(i as i32))
        .collect()
}

/// Returns alternate between `+amplitude` and `-amplitude`; `inverted` flips the phase.
pub fn zigzag_closes(count: usize, amplitude: f64, inverted: bool) -> Vec<f64> {
    let mut price = 100.0;
    let mut out = vec![price];
    for i in 1..count {
        let up = (i % 2 == 0) != inverted;
        price *= if up { 1.0 + amplitude } else { 1.0 - amplitude };
        out.push(price);
    }
    out
}

/// Deterministic noisy path.
pub fn noisy_closes(count: usize, seed: u64) -> Vec<f64> {
    let mut state = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut price = 50.0;
    (0..count)
        .map(|_| {
            let out = price;
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let u = (state % 10_000) as f64 / 10_000.0;
            price *= 1.0 + (u - 0.5) * 0.03;
            out
        })
        .collect()
}

pub fn series(code: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(code, bars_from_closes(code, "2024-01-01", closes)).unwrap()
}
