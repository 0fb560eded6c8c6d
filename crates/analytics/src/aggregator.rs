use shelfwise_core::{DomainResult, PolicyOutcome, percent_change, round_to};
use shelfwise_inventory::{RestockAction, RestockDecision, RestockPolicy};
use shelfwise_products::{Catalog, PricingPolicy, Product};

use crate::summary::{AnalyticsError, AnalyticsSummary, StockDistribution};

/// Products with stock below this count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Products with stock at or above this count as high stock.
pub const HIGH_STOCK_THRESHOLD: u32 = 50;

/// Products forecast to sell more than this count as high demand.
pub const HIGH_DEMAND_THRESHOLD: f64 = 20.0;

/// Both policy results for one catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEvaluation<'a> {
    pub product: &'a Product,
    pub restock: RestockDecision,
    pub pricing: PolicyOutcome<f64>,
}

impl ProductEvaluation<'_> {
    pub fn optimal_price(&self) -> f64 {
        *self.pricing.value()
    }

    /// Percentage change from the competitor price; `None` when that price is
    /// not positive.
    pub fn price_change(&self) -> Option<f64> {
        percent_change(self.optimal_price(), self.product.competitor_price)
    }
}

/// Runs the restock and pricing rules over a catalog.
#[derive(Debug, Clone)]
pub struct AnalyticsAggregator {
    restock: RestockPolicy,
    pricing: PricingPolicy,
    low_stock_threshold: u32,
    high_stock_threshold: u32,
    high_demand_threshold: f64,
}

impl AnalyticsAggregator {
    pub fn new(restock: RestockPolicy, pricing: PricingPolicy) -> Self {
        Self {
            restock,
            pricing,
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            high_stock_threshold: HIGH_STOCK_THRESHOLD,
            high_demand_threshold: HIGH_DEMAND_THRESHOLD,
        }
    }

    pub fn restock_policy(&self) -> &RestockPolicy {
        &self.restock
    }

    pub fn pricing_policy(&self) -> &PricingPolicy {
        &self.pricing
    }

    /// Evaluate a single product.
    ///
    /// Fails only when the product's own figures are unusable. A pricing
    /// failure degrades to the competitor price and is logged.
    pub fn evaluate<'a>(&self, product: &'a Product) -> DomainResult<ProductEvaluation<'a>> {
        product.validate()?;

        let restock = self.restock.decide(&product.restock_snapshot());

        // Catalog views are priced as of a weekday.
        let pricing = match self.pricing.recommend(&product.pricing_snapshot(false)) {
            Ok(price) => PolicyOutcome::Primary(price),
            Err(e) => {
                tracing::warn!(
                    product_id = %product.id,
                    error = %e,
                    "price recommendation failed; using competitor price"
                );
                PolicyOutcome::fallback(product.competitor_price, e.to_string())
            }
        };

        Ok(ProductEvaluation {
            product,
            restock,
            pricing,
        })
    }

    /// Summarize the catalog.
    ///
    /// Products that fail evaluation still count toward `total_products`,
    /// `low_stock_products` and `high_demand_products`, but are left out of
    /// `restock_needed`, the price average and the stock histogram. Fails when
    /// the catalog is non-empty and not a single product could be evaluated.
    pub fn summarize(&self, catalog: &Catalog) -> Result<AnalyticsSummary, AnalyticsError> {
        let total_products = catalog.len();
        let low_stock_products = catalog
            .iter()
            .filter(|p| p.current_stock < self.low_stock_threshold)
            .count();
        let high_demand_products = catalog
            .iter()
            .filter(|p| p.forecasted_demand > self.high_demand_threshold)
            .count();

        let mut evaluated = 0;
        let mut restock_needed = 0;
        let mut price_changes: Vec<f64> = Vec::with_capacity(catalog.len());
        let mut stock_distribution = StockDistribution::default();

        for product in catalog.iter() {
            let evaluation = match self.evaluate(product) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(product_id = %product.id, error = %e, "skipping product in analytics");
                    continue;
                }
            };
            evaluated += 1;

            if evaluation.restock.decision == RestockAction::Restock {
                restock_needed += 1;
            }
            if let Some(change) = evaluation.price_change() {
                price_changes.push(change);
            }

            let stock = product.current_stock;
            if stock < self.low_stock_threshold {
                stock_distribution.low += 1;
            } else if stock < self.high_stock_threshold {
                stock_distribution.medium += 1;
            } else {
                stock_distribution.high += 1;
            }
        }

        if evaluated == 0 && total_products > 0 {
            return Err(AnalyticsError::NothingEvaluated { total_products });
        }
        let avg_price_change = mean(&price_changes);

        Ok(AnalyticsSummary {
            total_products,
            low_stock_products,
            restock_needed,
            high_demand_products,
            avg_price_change: round_to(avg_price_change, 2),
            stock_distribution,
        })
    }
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        Self::new(RestockPolicy::default(), PricingPolicy::default())
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}
