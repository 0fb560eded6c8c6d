use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use shelfwise_analytics::AnalyticsSummary;

use crate::app::errors;
use crate::app::services::AppServices;

/// `GET /api/analytics`: catalog-wide summary statistics.
pub async fn get_analytics(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.aggregator.summarize(&services.catalog) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) if services.analytics_placeholder => {
            tracing::error!(error = %e, "analytics failed; serving placeholder figures");
            let placeholder = AnalyticsSummary::placeholder(services.catalog.len());
            (StatusCode::OK, Json(placeholder)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "analytics failed");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "analytics_failed", e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use shelfwise_products::Catalog;

    use crate::config::ApiConfig;

    /// Sample catalog with every product's demand made negative, so none of
    /// them can be evaluated.
    fn unusable_catalog() -> Catalog {
        let mut products = Catalog::sample().products().to_vec();
        for p in &mut products {
            p.forecasted_demand = -1.0;
        }
        Catalog::new(products)
    }

    async fn call(analytics_placeholder: bool) -> (StatusCode, Value) {
        let config = ApiConfig {
            analytics_placeholder,
            ..ApiConfig::default()
        };
        let services = Arc::new(AppServices::with_catalog(unusable_catalog(), &config));
        let res = get_analytics(Extension(services)).await;
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn aggregation_failure_is_a_server_error_by_default() {
        let (status, body) = call(false).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "analytics_failed");
        assert_eq!(body["message"], "none of the 6 catalog products could be evaluated");
    }

    #[tokio::test]
    async fn aggregation_failure_serves_placeholder_when_enabled() {
        let (status, body) = call(true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
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
