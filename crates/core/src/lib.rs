//! `shelfwise-core`: shared building blocks for the decision layer.
//!
//! This crate contains **pure** primitives (no IO, no HTTP).

pub mod error;
pub mod fields;
pub mod numeric;
pub mod outcome;

pub use error::{DomainError, DomainResult};
pub use fields::Fields;
pub use numeric::{percent_change, round_to};
pub use outcome::PolicyOutcome;
