//! Period returns and cross-series alignment.
//!
//! Two alignment policies are used before any cross-series computation:
//! - [`intersect_by_date`]: keep only dates present in every series (correlation
//!   matrix, sector analysis);
//! - [`truncate_to_common_tail`]: keep the most recent N observations of each,
//!   N being the shorter length (rolling correlation, beta).

use crate::domain::ohlcv::PriceSeries;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// `r_t = p_t / p_{t-1} - 1` with the leading undefined return dropped,
/// so the output has `prices.len() - 1` entries. A zero or non-finite
/// previous price gives `None`.
pub fn pct_returns(prices: &[f64]) -> Vec<Option<f64>> {
    prices
        .windows(2)
        .map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
                None
            } else {
                Some(curr / prev - 1.0)
            }
        })
        .collect()
}

/// Returns of one series, dated by the later bar of each pair.
pub fn dated_returns(series: &PriceSeries) -> (Vec<NaiveDate>, Vec<Option<f64>>) {
    let dates = series.dates().into_iter().skip(1).collect();
    (dates, pct_returns(&series.closes()))
}

/// The last `min(a.len(), b.len())` items of each slice.
pub fn truncate_to_common_tail<'a, 'b, T>(a: &'a [T], b: &'b [T]) -> (&'a [T], &'b [T]) {
    let n = a.len().min(b.len());
    (&a[a.len() - n..], &b[b.len() - n..])
}

/// Dates present in every series, ascending. Empty for an empty input.
pub fn build_common_timeline(series: &[&PriceSeries]) -> Vec<NaiveDate> {
    let mut iter = series.iter();
    let first = match iter.next() {
        Some(s) => s,
        None => return Vec::new(),
    };

    let mut common: BTreeSet<NaiveDate> = first.bars().iter().map(|b| b.date).collect();
    for s in iter {
        let dates: BTreeSet<NaiveDate> = s.bars().iter().map(|b| b.date).collect();
        common = common.intersection(&dates).copied().collect();
    }
    common.into_iter().collect()
}

/// Closing prices of several securities on a shared date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedCloses {
    pub dates: Vec<NaiveDate>,
    pub codes: Vec<String>,
    /// One column per code, each `dates.len()` long.
    pub columns: Vec<Vec<f64>>,
}

/// Returns of several securities on a shared date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedReturns {
    pub dates: Vec<NaiveDate>,
    pub codes: Vec<String>,
    pub columns: Vec<Vec<Option<f64>>>,
}

pub fn intersect_by_date(series: &[&PriceSeries]) -> AlignedCloses {
    let dates = build_common_timeline(series);

    let columns = series
        .iter()
        .map(|s| {
            let by_date: HashMap<NaiveDate, f64> =
                s.bars().iter().map(|b| (b.date, b.close)).collect();
            dates.iter().filter_map(|d| by_date.get(d).copied()).collect()
        })
        .collect();

    AlignedCloses {
        dates,
        codes: series.iter().map(|s| s.code().to_string()).collect(),
        columns,
    }
}

impl AlignedCloses {
    pub fn returns(&self) -> AlignedReturns {
        AlignedReturns {
            dates: self.dates.iter().skip(1).copied().collect(),
            codes: self.codes.clone(),
            columns: self.columns.iter().map(|c| pct_returns(c)).collect(),
        }
    }
}

impl AlignedReturns {
    /// Indices of rows where every column has a value.
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.dates.len())
            .filter(|&i| self.columns.iter().all(|c| c[i].is_some()))
            .collect()
    }
}
