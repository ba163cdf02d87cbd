//! Cross-security correlation analysis.
//!
//! All computations run on period returns, never raw prices. The matrix and
//! sector analysis align series by intersecting their dates; rolling
//! correlation and beta align two series on their common tail.

pub mod pairs;
pub mod portfolio;
pub mod rolling;
pub mod sector;

pub use pairs::{find_highly_correlated_pairs, CorrelatedPair, PairStrength};
pub use portfolio::{diversification_score, equal_weights, portfolio_correlation};
pub use rolling::{beta, detect_breakdowns, rolling_correlation, CorrelationBreakdown, RollingPoint};
pub use sector::{analyze_sector_correlation, SectorCorrelation};

use crate::domain::error::StockwatchError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::returns::{intersect_by_date, AlignedReturns};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Sums of squared deviations at or below this count as zero variance.
const VARIANCE_EPSILON: f64 = 1e-20;

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Sample Pearson correlation of two equal-length slices.
///
/// `None` for mismatched lengths, fewer than two observations, or a side
/// with zero variance. The result is clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= VARIANCE_EPSILON || var_y <= VARIANCE_EPSILON {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn has_variance(values: &[f64]) -> bool {
    if values.len() < 2 {
        return false;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() > VARIANCE_EPSILON
}

/// Square, symmetric matrix of pairwise correlations keyed by security code.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    codes: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Build from codes and rows. Fails unless `values` is `codes.len()` square.
    pub fn new(codes: Vec<String>, values: Vec<Vec<Option<f64>>>) -> Result<Self, StockwatchError> {
        let n = codes.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return Err(StockwatchError::MatrixShape {
                codes: n,
                rows: values.len(),
            });
        }
        Ok(Self { codes, values })
    }

    pub fn empty() -> Self {
        Self {
            codes: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Correlation between two codes; `None` if either is unknown or the
    /// entry has no value.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.at(self.index_of(a)?, self.index_of(b)?)
    }

    /// `(i, j, value)` for every entry strictly above the diagonal, row-major.
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, Option<f64>)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j, self.at(i, j))))
    }

    /// Defined upper-triangle values.
    pub fn off_diagonal_values(&self) -> Vec<f64> {
        self.upper_triangle().filter_map(|(_, _, v)| v).collect()
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            codes: self.codes.clone(),
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|v| v.map(|x| round_to(x, decimals))).collect())
                .collect(),
        }
    }
}

struct MatrixRow<'a> {
    codes: &'a [String],
    values: &'a [Option<f64>],
}

impl Serialize for MatrixRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.codes.len()))?;
        for (code, value) in self.codes.iter().zip(self.values) {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

/// Serialized as nested objects: `{code: {code: number | null}}`.
impl Serialize for CorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.codes.len()))?;
        for (code, row) in self.codes.iter().zip(&self.values) {
            map.serialize_entry(
                code,
                &MatrixRow {
                    codes: &self.codes,
                    values: row,
                },
            )?;
        }
        map.end()
    }
}

/// Pearson matrix over aligned returns. Only rows where every security has a
/// return take part.
pub fn correlation_matrix_from_returns(returns: &AlignedReturns) -> CorrelationMatrix {
    let rows = returns.complete_rows();
    let columns: Vec<Vec<f64>> = returns
        .columns
        .iter()
        .map(|col| rows.iter().filter_map(|&i| col[i]).collect())
        .collect();

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        if has_variance(&columns[i]) {
            values[i][i] = Some(1.0);
        }
        for j in i + 1..n {
            let c = pearson(&columns[i], &columns[j]);
            values[i][j] = c;
            values[j][i] = c;
        }
    }

    CorrelationMatrix {
        codes: returns.codes.clone(),
        values,
    }
}

/// Correlation matrix of daily returns over the dates every series shares.
pub fn correlation_matrix(series: &[&PriceSeries]) -> CorrelationMatrix {
    correlation_matrix_from_returns(&intersect_by_date(series).returns())
}
