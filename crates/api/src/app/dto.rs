use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shelfwise_analytics::ProductEvaluation;
use shelfwise_core::{DomainError, round_to};
use shelfwise_inventory::RestockAction;
use shelfwise_products::Product;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/predict`.
///
/// Both fields are optional at the serde level so that a missing field turns
/// into a `{success: false}` envelope instead of an extractor rejection.
///
/// `kind` keeps whatever JSON value was sent: `None` only when the key is
/// absent, `Some(Value::Null)` for an explicit null.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub kind: Option<Value>,
    pub data: Option<Value>,
}

impl PredictRequest {
    /// Resolve the requested prediction. Anything other than a known type
    /// name, including non-strings and null, is an invalid type.
    pub fn prediction_kind(&self) -> Result<PredictionKind, PredictError> {
        let kind = self.kind.as_ref().ok_or(PredictError::MissingType)?;
        kind.as_str()
            .and_then(PredictionKind::parse)
            .ok_or(PredictError::InvalidType)
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PredictionKind {
    Restock,
    Pricing,
}

impl PredictionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "restock" => Some(Self::Restock),
            "pricing" => Some(Self::Pricing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionKind::Restock => "restock",
            PredictionKind::Pricing => "pricing",
        }
    }
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("missing field `type`")]
    MissingType,

    #[error("Invalid prediction type")]
    InvalidType,

    #[error("missing field `data`")]
    MissingData,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

// -------------------------
// Response DTOs
// -------------------------

/// Envelope returned by `POST /api/predict`; always sent with HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// A catalog product with its policy results, as listed by `GET /api/products`.
#[derive(Debug, Serialize)]
pub struct ProductView<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub restock_decision: RestockAction,
    pub restock_quantity: u64,
    pub optimal_price: f64,
    pub price_change: f64,
}

impl<'a> From<&ProductEvaluation<'a>> for ProductView<'a> {
    fn from(e: &ProductEvaluation<'a>) -> Self {
        Self {
            product: e.product,
            restock_decision: e.restock.decision,
            restock_quantity: e.restock.restock_quantity,
            optimal_price: round_to(e.optimal_price(), 2),
            price_change: round_to(e.price_change().unwrap_or(0.0), 2),
        }
    }
}
