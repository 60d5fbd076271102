//! Engine crate for the recommendation comparison.
//!
//! This crate holds the engine that runs one strategy, or all of them,
//! against a shared dataset and shapes the results for display.

pub mod engine;

pub use engine::{Comparison, MetricRow, RecommendationEngine};
