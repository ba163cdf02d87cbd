//! Within-sector correlation.

use super::{correlation_matrix, round_to, CorrelationMatrix};
use crate::domain::ohlcv::PriceSeries;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorCorrelation {
    pub stocks: Vec<String>,
    pub correlation_matrix: CorrelationMatrix,
    pub average_correlation: Option<f64>,
    pub stock_count: usize,
}

/// Group `series` by `sectors` (code -> sector name) and correlate each group.
///
/// Codes without a series are ignored, as are series without a sector.
/// Sectors with fewer than two members are omitted. Matrix entries and the
/// average off-diagonal correlation are rounded to 3 places.
pub fn analyze_sector_correlation(
    series: &[PriceSeries],
    sectors: &BTreeMap<String, String>,
) -> BTreeMap<String, SectorCorrelation> {
    let mut groups: BTreeMap<&str, Vec<&PriceSeries>> = BTreeMap::new();
    for s in series {
        if let Some(sector) = sectors.get(s.code()) {
            groups.entry(sector.as_str()).or_default().push(s);
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(sector, members)| {
            let matrix = correlation_matrix(&members);
            let values = matrix.off_diagonal_values();
            let average_correlation = (!values.is_empty())
                .then(|| round_to(values.iter().sum::<f64>() / values.len() as f64, 3));

            let result = SectorCorrelation {
                stocks: members.iter().map(|s| s.code().to_string()).collect(),
                correlation_matrix: matrix.rounded(3),
                average_correlation,
                stock_count: members.len(),
            };
            (sector.to_string(), result)
        })
        .collect()
}
