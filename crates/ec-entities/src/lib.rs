//! Entity extraction for energy-statistics utterances.
//!
//! Runs alongside intent resolution on the same cleaned text and never
//! influences it.

pub mod catalog;
pub mod extract;

pub use catalog::{MEASURES, MeasureDef, PRODUCTS, ProductDef, measure_by_id};
pub use extract::extract;
