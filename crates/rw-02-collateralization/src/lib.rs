//! # RW-02 Collateralization Monitor
//!
//! Alerts when an RToken's basket handler reports it is not fully
//! collateralized.
//!
//! **Subsystem ID:** 02
//! **Trigger:** every new block
//!
//! ```text
//! RToken.main() ──→ Main.basketHandler() ──→ fullyCollateralized() ──false──→ Finding
//! ```
//!
//! Any read failure fails the pass; nothing is tolerated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{undercollateralized_finding, CollateralizationConfig, ALERT_ID, FINDING_NAME};
pub use ports::CollateralizationChain;
pub use service::{CollateralizationMonitor, MONITOR_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
