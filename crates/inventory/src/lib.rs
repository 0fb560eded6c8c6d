//! Inventory decision module.
//!
//! This crate contains the restock rule, implemented purely as deterministic
//! decision logic (no IO, no HTTP, no storage).

pub mod restock;

pub use restock::{
    RestockAction, RestockDecision, RestockPolicy, RestockSnapshot, BUFFER_STOCK,
    FALLBACK_SAFETY_FACTOR, MIN_STOCK, SAFETY_FACTOR, SALES_WINDOW_DAYS,
};
