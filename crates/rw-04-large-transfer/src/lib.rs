//! # RW-04 Large Transfer Monitor
//!
//! Alerts on ERC-20 transfers of more than 100,000 whole tokens into the
//! staked RSR contract.
//!
//! **Subsystem ID:** 04
//! **Trigger:** every transaction
//!
//! ## Finding Cap
//!
//! A monitor instance emits at most `finding_cap` findings (default 5) over
//! its lifetime. Once the cap is reached, transactions are not even decoded.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    normalize, FindingCap, LargeTransfer, LargeTransferConfig, ALERT_ID, DEFAULT_FINDING_CAP,
    DEFAULT_THRESHOLD_UNITS, FINDING_NAME, ST_RSR,
};
pub use ports::LargeTransferChain;
pub use service::{LargeTransferMonitor, MONITOR_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
