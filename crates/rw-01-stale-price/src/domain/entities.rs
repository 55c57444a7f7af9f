//! # Domain Entities
//!
//! What one pass resolves and what each evaluation concludes.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// An RToken discovered through the registry chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedResource {
    /// The RToken.
    pub rtoken: Address,
    /// Its `Main` component.
    pub main: Address,
    /// Deployer that created it.
    pub deployer: Address,
}

/// Why an RToken was not evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// `totalSupply()` is under the configured minimum.
    BelowMinimumSupply,
    /// No registered asset exposes `lastSave()`.
    NoFreshnessSignal,
}

/// An RToken whose first readable asset is older than the threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaleResource {
    /// The RToken.
    pub rtoken: Address,
    /// `name()` of the RToken.
    pub name: String,
    /// Asset whose `lastSave()` was read.
    pub asset: Address,
    /// `lastSave()` in unix seconds.
    pub last_save: U256,
    /// `block_timestamp - last_save`.
    pub age_secs: u64,
}

/// Result of evaluating one RToken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationOutcome {
    /// Freshest asset is within the threshold.
    Healthy,
    /// Asset data is older than the threshold.
    Stale(StaleResource),
    /// Not evaluated.
    Skipped(SkipReason),
}

impl EvaluationOutcome {
    /// The stale record, if any.
    pub fn as_stale(&self) -> Option<&StaleResource> {
        match self {
            EvaluationOutcome::Stale(stale) => Some(stale),
            _ => None,
        }
    }
}

/// Outcome of the first-match search over an asset registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreshnessProbe {
    /// First member whose asset answered `lastSave()`.
    Found {
        /// Registry member (ERC-20).
        erc20: Address,
        /// Its asset plugin.
        asset: Address,
        /// `lastSave()` value.
        last_save: U256,
    },
    /// Every member reverted.
    NoCandidate,
}
