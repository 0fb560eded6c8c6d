use serde::{Deserialize, Serialize};
use serde_json::Value;

use shelfwise_core::{DomainError, DomainResult, Fields, PolicyOutcome};

/// Reference daily demand used to scale the demand premium.
pub const AVG_DEMAND: f64 = 25.0;

/// Markup over competitor price before any adjustment.
pub const BASE_MARKUP: f64 = 1.1;

/// Added to the markup when inventory is scarce.
pub const SCARCITY_PREMIUM: f64 = 0.1;
pub const SCARCITY_THRESHOLD: f64 = 20.0;

/// Removed from the markup when inventory is plentiful.
pub const SURPLUS_DISCOUNT: f64 = 0.1;
pub const SURPLUS_THRESHOLD: f64 = 80.0;

/// Markup added per unit of `demand_forecast / AVG_DEMAND`.
pub const DEMAND_WEIGHT: f64 = 0.05;

pub const WEEKEND_MULTIPLIER: f64 = 1.05;

/// Inventory below this is critically low and priced up.
pub const CRITICAL_STOCK: f64 = 10.0;
pub const CRITICAL_MULTIPLIER: f64 = 1.2;

/// Inventory above this is overstocked and priced down.
pub const OVERSTOCK: f64 = 100.0;
pub const OVERSTOCK_MULTIPLIER: f64 = 0.85;

/// Recommended price never leaves `[PRICE_FLOOR, PRICE_CEILING] * competitor_price`.
pub const PRICE_FLOOR: f64 = 0.8;
pub const PRICE_CEILING: f64 = 1.2;

/// Inputs the pricing rule needs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub inventory: f64,
    pub demand_forecast: f64,
    pub competitor_price: f64,
    pub profit_margin: f64,
    #[serde(default)]
    pub is_weekend: bool,
    /// Demand per unit of competitor price. Carried for reporting; the rule
    /// does not read it.
    #[serde(default)]
    pub price_elasticity: Option<f64>,
}

impl PricingSnapshot {
    pub fn from_fields(fields: &Fields<'_>) -> DomainResult<Self> {
        Ok(Self {
            inventory: fields.number("inventory")?,
            demand_forecast: fields.number("demand_forecast")?,
            competitor_price: fields.number("competitor_price")?,
            profit_margin: fields.number("profit_margin")?,
            is_weekend: fields.flag("is_weekend")?,
            price_elasticity: fields.optional_number("price_elasticity")?,
        })
    }
}

/// Competitor-anchored pricing rule.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub avg_demand: f64,
    pub base_markup: f64,
    pub scarcity_premium: f64,
    pub scarcity_threshold: f64,
    pub surplus_discount: f64,
    pub surplus_threshold: f64,
    pub demand_weight: f64,
    pub weekend_multiplier: f64,
    pub critical_stock: f64,
    pub critical_multiplier: f64,
    pub overstock: f64,
    pub overstock_multiplier: f64,
    pub price_floor: f64,
    pub price_ceiling: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            avg_demand: AVG_DEMAND,
            base_markup: BASE_MARKUP,
            scarcity_premium: SCARCITY_PREMIUM,
            scarcity_threshold: SCARCITY_THRESHOLD,
            surplus_discount: SURPLUS_DISCOUNT,
            surplus_threshold: SURPLUS_THRESHOLD,
            demand_weight: DEMAND_WEIGHT,
            weekend_multiplier: WEEKEND_MULTIPLIER,
            critical_stock: CRITICAL_STOCK,
            critical_multiplier: CRITICAL_MULTIPLIER,
            overstock: OVERSTOCK,
            overstock_multiplier: OVERSTOCK_MULTIPLIER,
            price_floor: PRICE_FLOOR,
            price_ceiling: PRICE_CEILING,
        }
    }
}

impl PricingPolicy {
    /// Lowest and highest price the rule may recommend.
    pub fn bounds(&self, competitor_price: f64) -> (f64, f64) {
        (
            competitor_price * self.price_floor,
            competitor_price * self.price_ceiling,
        )
    }

    /// Primary rule. Fails only if the arithmetic leaves the finite range.
    pub fn recommend(&self, s: &PricingSnapshot) -> DomainResult<f64> {
        let mut markup = self.base_markup + self.demand_weight * (s.demand_forecast / self.avg_demand);
        if s.inventory < self.scarcity_threshold {
            markup += self.scarcity_premium;
        }
        if s.inventory > self.surplus_threshold {
            markup -= self.surplus_discount;
        }

        let mut price = s.competitor_price * markup;

        if s.is_weekend {
            price *= self.weekend_multiplier;
        }

        if s.inventory < self.critical_stock {
            price *= self.critical_multiplier;
        } else if s.inventory > self.overstock {
            price *= self.overstock_multiplier;
        }

        // max-then-min rather than f64::clamp: bounds invert for negative prices.
        let (floor, ceiling) = self.bounds(s.competitor_price);
        let price = price.max(floor).min(ceiling);

        if !price.is_finite() {
            return Err(DomainError::computation(format!(
                "recommended price is not finite ({price})"
            )));
        }
        Ok(price)
    }

    /// Evaluate a free-form JSON payload.
    ///
    /// Any missing or unusable field degrades to the competitor price. Errors
    /// only if `competitor_price` itself is unusable.
    pub fn evaluate(&self, data: &Value) -> DomainResult<PolicyOutcome<f64>> {
        let fields = Fields::from_value(data)?;

        let primary = PricingSnapshot::from_fields(&fields).and_then(|s| self.recommend(&s));
        match primary {
            Ok(price) => Ok(PolicyOutcome::Primary(price)),
            Err(e) => {
                let competitor_price = fields.number("competitor_price")?;
                Ok(PolicyOutcome::fallback(competitor_price, e.to_string()))
            }
        }
    }
}
