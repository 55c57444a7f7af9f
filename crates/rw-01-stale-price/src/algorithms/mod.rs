//! # Algorithms Module
//!
//! The three stages of a stale-price pass.

pub mod aggregator;
pub mod evaluator;
pub mod resolver;

pub use aggregator::{aggregate, ALERT_ID, FINDING_NAME};
pub use evaluator::{evaluate, probe_freshness};
pub use resolver::resolve;
