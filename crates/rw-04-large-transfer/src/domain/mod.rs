//! # Domain Module
//!
//! Configuration, the finding cap, amount normalization and the finding.

pub mod cap;

pub use cap::FindingCap;

use serde::{Deserialize, Serialize};
use shared_types::{
    address, format_address, Address, ChainError, Finding, FindingSeverity, FindingType,
    MonitorError, U256,
};

/// Staked RSR, the default transfer destination.
pub const ST_RSR: Address = address!("F014FEF41cCB703975827C8569a3f0940cFD80A4");

/// Whole tokens a transfer must exceed to alert.
pub const DEFAULT_THRESHOLD_UNITS: u64 = 100_000;

/// Findings per process lifetime.
pub const DEFAULT_FINDING_CAP: usize = 5;

/// Display name of the finding.
pub const FINDING_NAME: &str = "High ERC20 Token Transfer";

/// Alert id of the finding.
pub const ALERT_ID: &str = "RESERVE-LARGE-STAKE";

/// Largest exponent for which `10^decimals` fits in 256 bits.
const MAX_DECIMALS: u64 = 77;

/// Large-transfer monitor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeTransferConfig {
    /// Destination whose inbound transfers are watched.
    pub target: Address,
    /// Normalized amount must be strictly greater than this.
    pub threshold_units: U256,
    /// Findings allowed per process lifetime.
    pub finding_cap: usize,
}

impl Default for LargeTransferConfig {
    fn default() -> Self {
        Self {
            target: ST_RSR,
            threshold_units: U256::from(DEFAULT_THRESHOLD_UNITS),
            finding_cap: DEFAULT_FINDING_CAP,
        }
    }
}

impl LargeTransferConfig {
    /// Target must be set and the cap must allow at least one finding.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.target.is_zero() {
            return Err(MonitorError::InvalidConfig(
                "large-transfer target is the zero address".to_string(),
            ));
        }
        if self.finding_cap == 0 {
            return Err(MonitorError::InvalidConfig(
                "finding cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `value / 10^decimals`, truncating.
pub fn normalize(value: U256, decimals: U256) -> Result<U256, ChainError> {
    if decimals > U256::from(MAX_DECIMALS) {
        return Err(ChainError::Decode(format!(
            "decimals() returned {decimals}, above {MAX_DECIMALS}"
        )));
    }
    Ok(value / U256::from(10u64).pow(decimals))
}

/// A transfer that crossed the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LargeTransfer {
    /// Emitting token.
    pub token: Address,
    /// Sender.
    pub from: Address,
    /// Recipient (the configured target).
    pub to: Address,
    /// Raw amount.
    pub value: U256,
    /// Amount in whole tokens.
    pub normalized: U256,
}

impl LargeTransfer {
    /// Render the finding.
    pub fn into_finding(self) -> Finding {
        let to = format_address(&self.to);
        Finding::new(
            FINDING_NAME,
            format!(
                "High amount of ERC20 tokens transferred to {to}: {}",
                self.normalized
            ),
            ALERT_ID,
            FindingSeverity::Low,
            FindingType::Info,
        )
        .with_metadata("to", to)
        .with_metadata("from", format_address(&self.from))
        .with_metadata("value", self.value.to_string())
        .with_metadata("tokenAddress", format_address(&self.token))
    }
}
