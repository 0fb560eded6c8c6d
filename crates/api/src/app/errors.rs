use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shelfwise_core::DomainError;

/// Map a failure to evaluate server-held catalog data. These are never the
/// client's fault, so every variant is a 5xx.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    tracing::error!(error = %err, "catalog evaluation failed");
    match err {
        DomainError::MissingField(_) | DomainError::InvalidField { .. } | DomainError::Validation(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invalid_product", err.to_string())
        }
        DomainError::Computation(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "computation_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
