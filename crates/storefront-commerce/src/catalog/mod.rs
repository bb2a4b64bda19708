//! Catalog module.
//!
//! Contains product and review types plus local browse helpers.

mod browse;
mod product;

pub use browse::{ProductFilter, SortOption};
pub use product::{Product, Review, ReviewSubmission};
