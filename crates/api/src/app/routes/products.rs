use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use shelfwise_analytics::ProductEvaluation;

use crate::app::dto::ProductView;
use crate::app::errors;
use crate::app::services::AppServices;

/// `GET /api/products`: every catalog product with its restock decision and
/// recommended price.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let evaluations = match services
        .catalog
        .iter()
        .map(|p| services.aggregator.evaluate(p))
        .collect::<Result<Vec<ProductEvaluation<'_>>, _>>()
    {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let views: Vec<ProductView<'_>> = evaluations.iter().map(ProductView::from).collect();
    (StatusCode::OK, Json(views)).into_response()
}
