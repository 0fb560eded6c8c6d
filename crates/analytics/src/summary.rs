use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Histogram of products by current stock level.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Catalog-wide summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_products: usize,
    pub low_stock_products: usize,
    pub restock_needed: usize,
    pub high_demand_products: usize,
    /// Mean percentage difference between recommended and competitor price,
    /// rounded to two decimals.
    pub avg_price_change: f64,
    pub stock_distribution: StockDistribution,
}

impl AnalyticsSummary {
    /// Fixed stand-in figures for when aggregation fails and the deployment
    /// prefers a populated dashboard over an error.
    ///
    /// These numbers are not derived from the catalog.
    pub fn placeholder(total_products: usize) -> Self {
        Self {
            total_products,
            low_stock_products: 1,
            restock_needed: 1,
            high_demand_products: 1,
            avg_price_change: 2.5,
            stock_distribution: StockDistribution {
                low: 2,
                medium: 3,
                high: 1,
            },
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("none of the {total_products} catalog products could be evaluated")]
    NothingEvaluated { total_products: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn placeholder_keeps_the_real_total() {
        let s = AnalyticsSummary::placeholder(6);
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({
                "total_products": 6,
                "low_stock_products": 1,
                "restock_needed": 1,
                "high_demand_products": 1,
                "avg_price_change": 2.5,
                "stock_distribution": { "low": 2, "medium": 3, "high": 1 }
            })
        );
    }
}
