//! Watchlist and sector mapping.
//!
//! The watchlist is a set of named categories, each a comma-separated code
//! list in the `[watchlist]` section. `[sectors]` maps codes to sector names
//! for within-sector correlation.

use crate::ports::config_port::ConfigPort;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const WATCHLIST_SECTION: &str = "watchlist";
pub const SECTORS_SECTION: &str = "sectors";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty token in code list for category '{0}'")]
    EmptyToken(String),

    #[error("duplicate code {code} in category '{category}'")]
    DuplicateCode { category: String, code: String },

    #[error("watchlist has no codes")]
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Watchlist {
    /// Every code across all categories, de-duplicated and sorted.
    pub fn all_symbols(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.categories.values().flatten().collect();
        set.into_iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.all_symbols().len()
    }

    /// Read `[watchlist]`. Fails on malformed lists or when no code is listed.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, WatchlistError> {
        let mut categories = BTreeMap::new();
        for (category, list) in config.section_entries(WATCHLIST_SECTION) {
            let codes = parse_codes(&list).map_err(|e| match e {
                WatchlistError::EmptyToken(_) => WatchlistError::EmptyToken(category.clone()),
                WatchlistError::DuplicateCode { code, .. } => WatchlistError::DuplicateCode {
                    category: category.clone(),
                    code,
                },
                other => other,
            })?;
            categories.insert(category, codes);
        }

        let watchlist = Self { categories };
        if watchlist.all_symbols().is_empty() {
            return Err(WatchlistError::Empty);
        }
        Ok(watchlist)
    }
}

/// Split a comma-separated list into upper-cased codes.
pub fn parse_codes(input: &str) -> Result<Vec<String>, WatchlistError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(WatchlistError::EmptyToken(String::new()));
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(WatchlistError::DuplicateCode {
                category: String::new(),
                code,
            });
        }
        codes.push(code);
    }

    Ok(codes)
}

/// `[sectors]` as code -> sector. Codes are upper-cased; empty sector names
/// are dropped.
pub fn load_sector_map(config: &dyn ConfigPort) -> BTreeMap<String, String> {
    config
        .section_entries(SECTORS_SECTION)
        .into_iter()
        .filter(|(_, sector)| !sector.trim().is_empty())
        .map(|(code, sector)| (code.trim().to_uppercase(), sector.trim().to_string()))
        .collect()
}
