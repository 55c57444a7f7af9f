//! # RW-03 Governance Monitor
//!
//! Alerts on every `ProposalCreated` and `ProposalExecuted` emitted by the
//! governors of the watched RTokens.
//!
//! **Subsystem ID:** 03
//! **Trigger:** every new block; only logs of that block are read
//!
//! | Event | Alert id |
//! |-------|----------|
//! | `ProposalCreated` | `RESERVE-PROPOSAL-CREATED` |
//! | `ProposalExecuted` | `RESERVE-PROPOSAL-EXECUTED` |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    GovernanceConfig, GovernanceTarget, ProposalActivity, ProposalStage, ETH_PLUS_GOVERNOR,
    EUSD_GOVERNOR, HYUSD_GOVERNOR,
};
pub use ports::GovernanceChain;
pub use service::{GovernanceMonitor, MONITOR_NAME};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
