//! # RW-05 Slow Wallet Monitor
//!
//! Alerts on every `TransferProposed` emitted by a configured slow wallet.
//!
//! **Subsystem ID:** 05
//! **Trigger:** every transaction touching the wallet
//!
//! The wallet has no built-in default. The host registers this monitor only
//! when an address is configured.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod service;

pub use domain::{proposal_finding, SlowWalletConfig, ALERT_ID, FINDING_NAME};
pub use service::{SlowWalletMonitor, MONITOR_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
