use std::sync::Arc;

use axum::{Json, body::Bytes, extract::Extension};
use serde_json::{Value, json};

use shelfwise_core::round_to;

use crate::app::dto::{PredictError, PredictRequest, PredictResponse, PredictionKind};
use crate::app::services::AppServices;

/// `POST /api/predict`: run one policy over a caller-supplied payload.
///
/// Failures are reported in the envelope (`success: false`) with HTTP 200.
pub async fn predict(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> Json<PredictResponse> {
    match run_prediction(&services, &body) {
        Ok(result) => Json(PredictResponse::ok(result)),
        Err(e) => {
            tracing::info!(error = %e, "prediction rejected");
            Json(PredictResponse::failure(e.to_string()))
        }
    }
}

fn run_prediction(services: &AppServices, body: &[u8]) -> Result<Value, PredictError> {
    let req: PredictRequest = serde_json::from_slice(body)?;

    let kind = req.prediction_kind()?;
    let data = req.data.as_ref().ok_or(PredictError::MissingData)?;

    match kind {
        PredictionKind::Restock => {
            let outcome = services.restock_policy().evaluate(data)?;
            if let Some(reason) = outcome.fallback_reason() {
                tracing::warn!(kind = kind.as_str(), reason, "restock prediction used the fallback rule");
            }
            let decision = outcome.into_value();
            Ok(json!({
                "decision": decision.decision,
                "restock_quantity": decision.restock_quantity,
            }))
        }
        PredictionKind::Pricing => {
            let outcome = services.pricing_policy().evaluate(data)?;
            if let Some(reason) = outcome.fallback_reason() {
                tracing::warn!(kind = kind.as_str(), reason, "price prediction fell back to competitor price");
            }
            Ok(json!({ "optimal_price": round_to(outcome.into_value(), 2) }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn services() -> AppServices {
        AppServices::new(&ApiConfig::default())
    }

    fn run(body: Value) -> Result<Value, PredictError> {
        run_prediction(&services(), body.to_string().as_bytes())
    }

    #[test]
    fn restock_prediction_returns_decision() {
        let result = run(json!({
            "type": "restock",
            "data": {
                "current_stock": 8,
                "forecasted_demand": 15,
                "historical_sales": 18,
                "lead_time_days": 4
            }
        }))
        .unwrap();
        assert_eq!(
            result,
            json!({ "decision": "low-stock warning", "restock_quantity": 27 })
        );
    }

    #[test]
    fn pricing_prediction_rounds_to_cents() {
        let result = run(json!({
            "type": "pricing",
            "data": {
                "inventory": 8,
                "demand_forecast": 15,
                "competitor_price": 8.99,
                "profit_margin": 0.2,
                "is_weekend": 0
            }
        }))
        .unwrap();
        assert_eq!(result, json!({ "optimal_price": 10.79 }));
    }

    #[test]
    fn unknown_type_is_reported() {
        let err = run(json!({ "type": "unknown" })).unwrap_err();
        assert_eq!(err.to_string(), "Invalid prediction type");
    }

    #[test]
    fn non_string_type_is_an_invalid_type() {
        for body in [
            json!({ "type": 5 }),
            json!({ "type": null, "data": {} }),
            json!({ "type": ["restock"] }),
        ] {
            let err = run(body).unwrap_err();
            assert_eq!(err.to_string(), "Invalid prediction type");
        }
    }

    #[test]
    fn structural_problems_are_reported() {
        assert!(matches!(run(json!({ "data": {} })), Err(PredictError::MissingType)));
        assert!(matches!(run(json!({ "type": "restock" })), Err(PredictError::MissingData)));
        assert!(matches!(
            run_prediction(&services(), b"not json"),
            Err(PredictError::MalformedBody(_))
        ));
        let err = run(json!({ "type": "pricing", "data": { "inventory": 3 } })).unwrap_err();
        assert_eq!(err.to_string(), "missing field `competitor_price`");
    }
}
