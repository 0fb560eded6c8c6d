use serde::{Deserialize, Serialize};

use shelfwise_core::{DomainError, DomainResult};
use shelfwise_inventory::RestockSnapshot;

use crate::pricing::PricingSnapshot;

/// A catalog entry: descriptive metadata plus the figures the policies read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub department: String,
    pub store: String,
    pub current_stock: u32,
    pub forecasted_demand: f64,
    pub historical_sales: f64,
    pub lead_time_days: u32,
    pub competitor_price: f64,
    pub profit_margin: f64,
}

impl Product {
    pub fn restock_snapshot(&self) -> RestockSnapshot {
        RestockSnapshot {
            current_stock: f64::from(self.current_stock),
            forecasted_demand: self.forecasted_demand,
            historical_sales: self.historical_sales,
            lead_time_days: f64::from(self.lead_time_days),
        }
    }

    pub fn pricing_snapshot(&self, is_weekend: bool) -> PricingSnapshot {
        PricingSnapshot {
            inventory: f64::from(self.current_stock),
            demand_forecast: self.forecasted_demand,
            competitor_price: self.competitor_price,
            profit_margin: self.profit_margin,
            is_weekend,
            price_elasticity: (self.competitor_price > 0.0)
                .then(|| self.forecasted_demand / self.competitor_price),
        }
    }

    /// Check that the numeric figures are usable by the policies.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("forecasted_demand", self.forecasted_demand),
            ("historical_sales", self.historical_sales),
            ("competitor_price", self.competitor_price),
        ] {
            if !value.is_finite() {
                return Err(DomainError::invalid(field, "must be finite"));
            }
            if value < 0.0 {
                return Err(DomainError::invalid(field, "must not be negative"));
            }
        }
        if !(0.0..=1.0).contains(&self.profit_margin) {
            return Err(DomainError::invalid("profit_margin", "must be within [0, 1]"));
        }
        Ok(())
    }
}

/// Read-only product list, built once at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demonstration catalog served by the API.
    pub fn sample() -> Self {
        Self::new(vec![
            product(
                "FOODS_3_001_CA_1_evaluation",
                "Organic Bananas",
                "FOODS_3",
                "FOODS",
                Figures { stock: 45, demand: 30.0, sales: 25.0, lead_time: 3, price: 2.99, margin: 0.25 },
            ),
            product(
                "HOBBIES_1_001_CA_1_evaluation",
                "Board Game Set",
                "HOBBIES_1",
                "HOBBIES",
                Figures { stock: 15, demand: 8.0, sales: 12.0, lead_time: 7, price: 24.99, margin: 0.30 },
            ),
            product(
                "HOUSEHOLD_1_001_CA_1_evaluation",
                "Laundry Detergent",
                "HOUSEHOLD_1",
                "HOUSEHOLD",
                Figures { stock: 8, demand: 15.0, sales: 18.0, lead_time: 4, price: 8.99, margin: 0.20 },
            ),
            product(
                "FOODS_1_002_CA_1_evaluation",
                "Whole Wheat Bread",
                "FOODS_1",
                "FOODS",
                Figures { stock: 85, demand: 22.0, sales: 28.0, lead_time: 2, price: 3.49, margin: 0.35 },
            ),
            product(
                "HOBBIES_2_003_CA_1_evaluation",
                "Art Supplies Kit",
                "HOBBIES_2",
                "HOBBIES",
                Figures { stock: 32, demand: 6.0, sales: 9.0, lead_time: 10, price: 19.99, margin: 0.40 },
            ),
            product(
                "HOUSEHOLD_2_004_CA_1_evaluation",
                "Kitchen Towels",
                "HOUSEHOLD_2",
                "HOUSEHOLD",
                Figures { stock: 12, demand: 35.0, sales: 32.0, lead_time: 5, price: 12.99, margin: 0.25 },
            ),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

struct Figures {
    stock: u32,
    demand: f64,
    sales: f64,
    lead_time: u32,
    price: f64,
    margin: f64,
}

// Every sample product lives in the same store.
fn product(id: &str, name: &str, category: &str, department: &str, f: Figures) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        department: department.to_string(),
        store: "CA_1".to_string(),
        current_stock: f.stock,
        forecasted_demand: f.demand,
        historical_sales: f.sales,
        lead_time_days: f.lead_time,
        competitor_price: f.price,
        profit_margin: f.margin,
    }
}
