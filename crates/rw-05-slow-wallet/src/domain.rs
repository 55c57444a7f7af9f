//! # Domain
//!
//! The watched wallet and the proposal finding.

use serde::{Deserialize, Serialize};
use shared_types::contract_events::TransferProposed;
use shared_types::{format_address, Address, Finding, FindingSeverity, FindingType, MonitorError};

/// Display name of the finding.
pub const FINDING_NAME: &str = "SlowWallet Transfer Proposed";

/// Alert id of the finding.
pub const ALERT_ID: &str = "RESERVE-SLOW-WALLET-PROPOSAL";

/// Slow-wallet monitor configuration. There is no default wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowWalletConfig {
    /// Wallet emitting `TransferProposed`.
    pub wallet: Address,
}

impl SlowWalletConfig {
    /// Watch `wallet`.
    pub fn new(wallet: Address) -> Self {
        Self { wallet }
    }

    /// The wallet must be a real address.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.wallet.is_zero() {
            return Err(MonitorError::InvalidConfig(
                "slow wallet is the zero address".to_string(),
            ));
        }
        Ok(())
    }
}

/// Render one `TransferProposed` as a finding.
pub fn proposal_finding(proposal: &TransferProposed) -> Finding {
    let destination = format_address(&proposal.destination);
    Finding::new(
        FINDING_NAME,
        format!(
            "Transfer of {} tokens proposed to {destination} (index {})",
            proposal.value, proposal.index
        ),
        ALERT_ID,
        FindingSeverity::Info,
        FindingType::Info,
    )
    .with_metadata("index", proposal.index.to_string())
    .with_metadata("destination", destination)
    .with_metadata("value", proposal.value.to_string())
    .with_metadata("delayUntil", proposal.delayUntil.to_string())
    .with_metadata("notes", proposal.notes.clone())
}
