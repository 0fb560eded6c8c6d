use axum::{
    Router,
    routing::{get, post},
};

pub mod analytics;
pub mod predict;
pub mod products;
pub mod system;

/// Router for the JSON endpoints (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/predict", post(predict::predict))
        .route("/analytics", get(analytics::get_analytics))
}
