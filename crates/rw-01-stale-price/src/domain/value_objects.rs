//! # Domain Value Objects
//!
//! Compiled-in constants and the monitor configuration.

use serde::{Deserialize, Serialize};
use shared_types::{address, Address, U256};

use super::errors::StalePriceError;

/// Mainnet deployer registry (`DeploymentRegistered` emitter).
pub const DEPLOYER_REGISTRY: Address = address!("D85Fac03804a3e44D29c494f3761D11A2262cBBe");

/// An asset is stale once it has not saved a price for longer than this.
pub const DEFAULT_STALE_THRESHOLD_SECS: u64 = 6 * 60 * 60;

/// RTokens with less supply than this many whole units are ignored.
pub const DEFAULT_MIN_SUPPLY_UNITS: u64 = 100;

/// Stale-price monitor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalePriceConfig {
    /// Root registry enumerating deployers.
    pub registry: Address,
    /// Strict upper bound on `block_timestamp - lastSave`.
    pub stale_threshold_secs: u64,
    /// Minimum `totalSupply()` (18 decimals) for an RToken to be evaluated.
    pub min_supply: U256,
}

impl Default for StalePriceConfig {
    fn default() -> Self {
        Self {
            registry: DEPLOYER_REGISTRY,
            stale_threshold_secs: DEFAULT_STALE_THRESHOLD_SECS,
            min_supply: U256::from(DEFAULT_MIN_SUPPLY_UNITS)
                * U256::from(10u64).pow(U256::from(18u64)),
        }
    }
}

impl StalePriceConfig {
    /// Override the threshold in whole hours.
    pub fn with_threshold_hours(mut self, hours: u64) -> Result<Self, StalePriceError> {
        self.stale_threshold_secs = hours.checked_mul(60 * 60).ok_or_else(|| {
            StalePriceError::InvalidConfig(format!("{hours} hours overflows the threshold in seconds"))
        })?;
        Ok(self)
    }

    /// Reject configurations that could never alert or would always alert.
    pub fn validate(&self) -> Result<(), StalePriceError> {
        if self.registry.is_zero() {
            return Err(StalePriceError::InvalidConfig(
                "registry address is zero".to_string(),
            ));
        }
        if self.stale_threshold_secs == 0 {
            return Err(StalePriceError::InvalidConfig(
                "stale threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Threshold rendered for alert text, e.g. `6` or `1.50`.
    pub fn threshold_hours_label(&self) -> String {
        let secs = self.stale_threshold_secs;
        if secs % 3600 == 0 {
            (secs / 3600).to_string()
        } else {
            format!("{:.2}", secs as f64 / 3600.0)
        }
    }
}
