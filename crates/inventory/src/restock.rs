use serde::{Deserialize, Serialize};
use serde_json::Value;

use shelfwise_core::{DomainResult, Fields, PolicyOutcome};

/// Stock level below which a low-stock warning is raised regardless of demand.
pub const MIN_STOCK: f64 = 10.0;

/// Share of forecasted demand held back as safety stock.
pub const SAFETY_FACTOR: f64 = 0.8;

/// Units added on top of forecasted demand when sizing a restock order.
pub const BUFFER_STOCK: f64 = 20.0;

/// Days over which historical sales are averaged into a daily rate.
pub const SALES_WINDOW_DAYS: f64 = 30.0;

/// Share of forecasted demand used as the restock threshold by the fallback rule.
pub const FALLBACK_SAFETY_FACTOR: f64 = 0.5;

/// What to do about a product's stock level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestockAction {
    #[serde(rename = "low-stock warning")]
    LowStockWarning,
    #[serde(rename = "restock")]
    Restock,
    #[serde(rename = "no restock")]
    NoRestock,
}

impl RestockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestockAction::LowStockWarning => "low-stock warning",
            RestockAction::Restock => "restock",
            RestockAction::NoRestock => "no restock",
        }
    }
}

impl core::fmt::Display for RestockAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restock decision plus the quantity to order.
///
/// Invariant: `restock_quantity == 0` exactly when `decision` is `NoRestock`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockDecision {
    pub decision: RestockAction,
    pub restock_quantity: u64,
}

impl RestockDecision {
    pub fn no_restock() -> Self {
        Self {
            decision: RestockAction::NoRestock,
            restock_quantity: 0,
        }
    }

    fn order(decision: RestockAction, raw_quantity: f64, shortfall: f64) -> Self {
        Self {
            decision,
            restock_quantity: order_quantity(raw_quantity, shortfall),
        }
    }
}

/// Inputs the primary restock rule needs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockSnapshot {
    pub current_stock: f64,
    pub forecasted_demand: f64,
    pub historical_sales: f64,
    pub lead_time_days: f64,
}

impl RestockSnapshot {
    pub fn from_fields(fields: &Fields<'_>) -> DomainResult<Self> {
        Ok(Self {
            current_stock: fields.number("current_stock")?,
            forecasted_demand: fields.number("forecasted_demand")?,
            historical_sales: fields.number("historical_sales")?,
            lead_time_days: fields.number("lead_time_days")?,
        })
    }
}

/// Safety-stock based restock rule.
///
/// Parameters default to the module constants; tests and callers may tune them.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockPolicy {
    pub min_stock: f64,
    pub safety_factor: f64,
    pub buffer_stock: f64,
    pub sales_window_days: f64,
    pub fallback_safety_factor: f64,
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            min_stock: MIN_STOCK,
            safety_factor: SAFETY_FACTOR,
            buffer_stock: BUFFER_STOCK,
            sales_window_days: SALES_WINDOW_DAYS,
            fallback_safety_factor: FALLBACK_SAFETY_FACTOR,
        }
    }
}

impl RestockPolicy {
    /// Forecast-weighted demand plus expected sales over the lead time.
    pub fn safety_stock(&self, s: &RestockSnapshot) -> f64 {
        s.forecasted_demand * self.safety_factor
            + s.lead_time_days * s.historical_sales / self.sales_window_days
    }

    /// Primary rule.
    pub fn decide(&self, s: &RestockSnapshot) -> RestockDecision {
        let top_up = s.forecasted_demand + self.buffer_stock - s.current_stock;

        if s.current_stock < self.min_stock {
            return RestockDecision::order(
                RestockAction::LowStockWarning,
                top_up,
                self.min_stock - s.current_stock,
            );
        }

        let safety_stock = self.safety_stock(s);
        if s.current_stock < safety_stock {
            return RestockDecision::order(
                RestockAction::Restock,
                top_up,
                safety_stock - s.current_stock,
            );
        }

        RestockDecision::no_restock()
    }

    /// Simplified rule used when lead time or sales history is unusable.
    pub fn decide_simple(&self, current_stock: f64, forecasted_demand: f64) -> RestockDecision {
        if current_stock < self.min_stock {
            let shortfall = self.min_stock - current_stock;
            return RestockDecision::order(RestockAction::LowStockWarning, shortfall, shortfall);
        }

        let threshold = forecasted_demand * self.fallback_safety_factor;
        if current_stock < threshold {
            return RestockDecision::order(
                RestockAction::Restock,
                forecasted_demand - current_stock + self.buffer_stock,
                threshold - current_stock,
            );
        }

        RestockDecision::no_restock()
    }

    /// Evaluate a free-form JSON payload.
    ///
    /// Falls back to [`decide_simple`](Self::decide_simple) when any primary
    /// field is missing or mistyped. Errors only if `current_stock` or
    /// `forecasted_demand` themselves are unusable.
    pub fn evaluate(&self, data: &Value) -> DomainResult<PolicyOutcome<RestockDecision>> {
        let fields = Fields::from_value(data)?;

        match RestockSnapshot::from_fields(&fields) {
            Ok(snapshot) => Ok(PolicyOutcome::Primary(self.decide(&snapshot))),
            Err(primary) => {
                let current_stock = fields.number("current_stock")?;
                let forecasted_demand = fields.number("forecasted_demand")?;
                Ok(PolicyOutcome::fallback(
                    self.decide_simple(current_stock, forecasted_demand),
                    primary.to_string(),
                ))
            }
        }
    }
}

/// Truncate toward zero, never returning 0 for a decision that orders stock:
/// a formula that truncates to nothing is topped up to cover `shortfall`.
fn order_quantity(raw: f64, shortfall: f64) -> u64 {
    let quantity = raw.max(0.0).trunc() as u64;
    if quantity > 0 {
        quantity
    } else {
        shortfall.ceil().max(1.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelfwise_core::DomainError;

    fn snapshot(cs: f64, fd: f64, hs: f64, lt: f64) -> RestockSnapshot {
        RestockSnapshot {
            current_stock: cs,
            forecasted_demand: fd,
            historical_sales: hs,
            lead_time_days: lt,
        }
    }

    #[test]
    fn low_stock_orders_demand_plus_buffer() {
        let d = RestockPolicy::default().decide(&snapshot(8.0, 15.0, 18.0, 4.0));
        assert_eq!(d.decision, RestockAction::LowStockWarning);
        assert_eq!(d.restock_quantity, 27);
    }

    #[test]
    fn stock_above_safety_level_needs_nothing() {
        let policy = RestockPolicy::default();
        let s = snapshot(85.0, 22.0, 28.0, 2.0);
        assert!((policy.safety_stock(&s) - 19.4666).abs() < 1e-3);
        assert_eq!(policy.decide(&s), RestockDecision::no_restock());
    }

    #[test]
    fn stock_below_safety_level_restocks() {
        // safety = 35*0.8 + 5*32/30 = 33.33
        let d = RestockPolicy::default().decide(&snapshot(12.0, 35.0, 32.0, 5.0));
        assert_eq!(d.decision, RestockAction::Restock);
        assert_eq!(d.restock_quantity, 43);
    }

    #[test]
    fn fractional_quantity_truncates() {
        let d = RestockPolicy::default().decide(&snapshot(12.5, 35.0, 32.0, 5.0));
        assert_eq!(d.restock_quantity, 42);
    }

    #[test]
    fn restock_triggered_by_lead_time_still_orders_something() {
        // safety = 0 + 30*100/30 = 100, but demand + buffer - stock = -30.
        let d = RestockPolicy::default().decide(&snapshot(50.0, 0.0, 100.0, 30.0));
        assert_eq!(d.decision, RestockAction::Restock);
        assert_eq!(d.restock_quantity, 50);
    }

    #[test]
    fn evaluate_uses_primary_rule_when_fields_present() {
        let out = RestockPolicy::default()
            .evaluate(&json!({
                "current_stock": 8,
                "forecasted_demand": 15,
                "historical_sales": 18,
                "lead_time_days": 4,
                "cat_id": "HOUSEHOLD_1"
            }))
            .unwrap();
        assert!(!out.is_fallback());
        assert_eq!(out.value().restock_quantity, 27);
    }

    #[test]
    fn evaluate_falls_back_when_history_is_missing() {
        let policy = RestockPolicy::default();

        let out = policy
            .evaluate(&json!({ "current_stock": 8, "forecasted_demand": 15 }))
            .unwrap();
        assert_eq!(out.fallback_reason(), Some("missing field `historical_sales`"));
        assert_eq!(
            out.into_value(),
            RestockDecision {
                decision: RestockAction::LowStockWarning,
                restock_quantity: 2,
            }
        );

        let out = policy
            .evaluate(&json!({
                "current_stock": 12,
                "forecasted_demand": 40,
                "historical_sales": "n/a",
                "lead_time_days": 3
            }))
            .unwrap();
        assert!(out.is_fallback());
        assert_eq!(
            out.into_value(),
            RestockDecision {
                decision: RestockAction::Restock,
                restock_quantity: 48,
            }
        );

        let out = policy
            .evaluate(&json!({ "current_stock": 30, "forecasted_demand": 40 }))
            .unwrap();
        assert_eq!(out.into_value(), RestockDecision::no_restock());
    }

    #[test]
    fn evaluate_errors_when_fallback_inputs_are_missing() {
        let err = RestockPolicy::default()
            .evaluate(&json!({ "forecasted_demand": 15 }))
            .unwrap_err();
        assert_eq!(err, DomainError::missing("current_stock"));
    }

    #[test]
    fn decisions_serialize_as_labels() {
        let json = serde_json::to_value(RestockDecision::no_restock()).unwrap();
        assert_eq!(json, json!({ "decision": "no restock", "restock_quantity": 0 }));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: anything under the minimum stock is a low-stock warning.
            #[test]
            fn under_minimum_is_always_a_warning(
                cs in 0.0f64..10.0,
                fd in 0.0f64..1_000.0,
                hs in 0.0f64..1_000.0,
                lt in 0.0f64..60.0
            ) {
                let d = RestockPolicy::default().decide(&snapshot(cs, fd, hs, lt));
                prop_assert_eq!(d.decision, RestockAction::LowStockWarning);
            }

            /// Property: quantity is zero exactly when nothing is ordered.
            #[test]
            fn quantity_is_zero_iff_no_restock(
                cs in 0u32..500,
                fd in 0.0f64..500.0,
                hs in 0.0f64..500.0,
                lt in 0u32..60
            ) {
                let policy = RestockPolicy::default();
                let primary = policy.decide(&snapshot(cs as f64, fd, hs, lt as f64));
                let simple = policy.decide_simple(cs as f64, fd);
                for d in [primary, simple] {
                    prop_assert_eq!(
                        d.restock_quantity == 0,
                        d.decision == RestockAction::NoRestock
                    );
                }
            }
        }
    }
}
