//! Core domain types and analytics.

pub mod analysis;
pub mod analysis_config;
pub mod config_validation;
pub mod correlation;
pub mod correlation_report;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod momentum;
pub mod ohlcv;
pub mod pair;
pub mod report;
pub mod returns;
pub mod signal;
pub mod watchlist;
