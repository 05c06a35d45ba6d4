//! Ad placement: campaign aggregation, slot resolution and the ad console.
//!
//! Campaigns live in four storage buckets (user ads plus the three vendor
//! formats). Every read goes through the aggregator, which merges them into
//! one deduplicated set.

pub mod aggregator;
pub mod console;
pub mod models;
pub mod resolver;
pub mod vendor;

pub use aggregator::{aggregate, AdAggregator};
pub use console::AdConsole;
pub use resolver::{resolve_from, SlotResolver};
