//! # RW-01 Stale Price Monitor
//!
//! Alerts when RTokens have asset price data older than a threshold.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports + Algorithms)
//! **Trigger:** every new block
//!
//! ## Pipeline
//!
//! ```text
//! resolve ──→ [ManagedResource] ──→ evaluate ×N (concurrent) ──→ aggregate ──→ 0 or 1 Finding
//! ```
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | Resolver | deployer registry | RTokens created by every deployer |
//! | Evaluator | one RToken, block timestamp | `Healthy`, `Stale` or `Skipped` |
//! | Aggregator | all outcomes | one batched `RESERVE-STALE-PRICE` finding |
//!
//! ## Failure Policy
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Asset reverts on `toAsset` / `lastSave` | next registry member |
//! | Deployer log query fails | deployer contributes nothing |
//! | Registry log query fails | pass fails |
//! | Any other read fails | pass fails |
//!
//! ## Module Structure
//!
//! ```text
//! rw-01-stale-price/
//! ├── domain/          # ManagedResource, EvaluationOutcome, config, errors
//! ├── ports/           # StalePriceChain
//! ├── algorithms/      # resolver, evaluator, aggregator
//! └── service.rs       # StalePriceMonitor (BlockHandler)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{aggregate, evaluate, probe_freshness, resolve, ALERT_ID, FINDING_NAME};
pub use domain::{
    EvaluationOutcome, FreshnessProbe, ManagedResource, SkipReason, StalePriceConfig,
    StalePriceError, StaleResource, DEFAULT_MIN_SUPPLY_UNITS, DEFAULT_STALE_THRESHOLD_SECS,
    DEPLOYER_REGISTRY,
};
pub use ports::StalePriceChain;
pub use service::{StalePriceMonitor, MONITOR_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
