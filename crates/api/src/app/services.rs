use shelfwise_analytics::AnalyticsAggregator;
use shelfwise_inventory::RestockPolicy;
use shelfwise_products::{Catalog, PricingPolicy};

use crate::config::ApiConfig;

/// Read-only state shared by every handler.
///
/// Built once at startup; nothing here is mutated afterwards, so handlers share
/// it through an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub catalog: Catalog,
    pub aggregator: AnalyticsAggregator,
    pub analytics_placeholder: bool,
}

impl AppServices {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_catalog(Catalog::sample(), config)
    }

    pub fn with_catalog(catalog: Catalog, config: &ApiConfig) -> Self {
        tracing::info!(products = catalog.len(), "catalog loaded");
        Self {
            catalog,
            aggregator: AnalyticsAggregator::new(RestockPolicy::default(), PricingPolicy::default()),
            analytics_placeholder: config.analytics_placeholder,
        }
    }

    pub fn restock_policy(&self) -> &RestockPolicy {
        self.aggregator.restock_policy()
    }

    pub fn pricing_policy(&self) -> &PricingPolicy {
        self.aggregator.pricing_policy()
    }
}
