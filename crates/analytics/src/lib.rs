//! `shelfwise-analytics`
//!
//! **Responsibility:** derive per-product evaluations and catalog-wide summary
//! statistics by running the restock and pricing rules over the catalog.
//!
//! - It must not mutate the catalog.
//! - It reports per-product failures and skips them instead of failing the run.

pub mod aggregator;
pub mod summary;

pub use aggregator::{AnalyticsAggregator, ProductEvaluation};
pub use summary::{AnalyticsError, AnalyticsSummary, StockDistribution};
