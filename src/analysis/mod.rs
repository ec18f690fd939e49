//! Analysis modules.
//!
//! Aggregation of loaded mutation reports into summary counts.

pub mod aggregator;

pub use aggregator::*;
