//! Products module: the sample catalog and the pricing rule.
//!
//! Pure, deterministic logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod pricing;

pub use catalog::{Catalog, Product};
pub use pricing::{PricingPolicy, PricingSnapshot};
