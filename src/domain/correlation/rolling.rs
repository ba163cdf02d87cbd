//! Two-series analysis over a common tail: rolling correlation, breakdown
//! detection and beta.

use super::{pearson, VARIANCE_EPSILON};
use crate::domain::indicator::rolling;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::returns::{dated_returns, truncate_to_common_tail};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingPoint {
    pub date: NaiveDate,
    pub correlation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationBreakdown {
    pub date: NaiveDate,
    /// Absolute move from the previous point.
    pub correlation_change: f64,
    pub new_correlation: f64,
}

/// Moving-window Pearson correlation of the returns of `a` and `b`.
///
/// Both return series are cut to their common tail first. Points carry the
/// dates of `a`. A window holding any missing return, or a window wider than
/// the history, has no value.
pub fn rolling_correlation(a: &PriceSeries, b: &PriceSeries, window: usize) -> Vec<RollingPoint> {
    let (dates_a, returns_a) = dated_returns(a);
    let (_, returns_b) = dated_returns(b);
    let (ra, rb) = truncate_to_common_tail(&returns_a, &returns_b);
    let dates = &dates_a[dates_a.len() - ra.len()..];

    let values = rolling(ra.len(), window, |start, end| {
        let xs: Option<Vec<f64>> = ra[start..=end].iter().copied().collect();
        let ys: Option<Vec<f64>> = rb[start..=end].iter().copied().collect();
        pearson(&xs?, &ys?)
    });

    dates
        .iter()
        .zip(values)
        .map(|(&date, correlation)| RollingPoint { date, correlation })
        .collect()
}

/// Adjacent defined points whose correlation moved by more than `threshold`.
pub fn detect_breakdowns(points: &[RollingPoint], threshold: f64) -> Vec<CorrelationBreakdown> {
    points
        .windows(2)
        .filter_map(|w| {
            let prev = w[0].correlation?;
            let curr = w[1].correlation?;
            let change = (curr - prev).abs();
            (change > threshold).then_some(CorrelationBreakdown {
                date: w[1].date,
                correlation_change: change,
                new_correlation: curr,
            })
        })
        .collect()
}

/// `cov(stock, market) / var(market)` over the common tail of both return
/// series. The covariance is the sample estimate (n - 1), the market variance
/// the population one (n).
pub fn beta(stock: &PriceSeries, market: &PriceSeries) -> Option<f64> {
    let (_, stock_returns) = dated_returns(stock);
    let (_, market_returns) = dated_returns(market);
    let (rs, rm) = truncate_to_common_tail(&stock_returns, &market_returns);

    let (xs, ms): (Vec<f64>, Vec<f64>) = rs
        .iter()
        .zip(rm)
        .filter_map(|(s, m)| Some(((*s)?, (*m)?)))
        .unzip();
    if xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_s = xs.iter().sum::<f64>() / n;
    let mean_m = ms.iter().sum::<f64>() / n;
    let (cov, var) = xs.iter().zip(&ms).fold((0.0, 0.0), |(cov, var), (s, m)| {
        (cov + (s - mean_s) * (m - mean_m), var + (m - mean_m).powi(2))
    });

    if var <= VARIANCE_EPSILON {
        return None;
    }
    Some((cov / (n - 1.0)) / (var / n))
}
