//! # Domain
//!
//! Monitored (RToken, governor) pairs and the two proposal findings.

use serde::{Deserialize, Serialize};
use shared_types::mainnet::{ETH_PLUS, EUSD, HYUSD};
use shared_types::{
    address, format_address, Address, Finding, FindingSeverity, FindingType, MonitorError, TxHash,
    U256,
};

/// Governor of eUSD.
pub const EUSD_GOVERNOR: Address = address!("7e880d8bD9c9612D6A9759F96aCD23df4A4650E6");

/// Governor of hyUSD.
pub const HYUSD_GOVERNOR: Address = address!("22d7937438b4bBf02f6cA55E3831ABB94Bd0b6f1");

/// Governor of ETH+.
pub const ETH_PLUS_GOVERNOR: Address = address!("239cDcBE174B4728c870A24F77540dAB3dC5F981");

/// An RToken and the governor whose proposals are watched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceTarget {
    /// RToken (its `name()` labels the alerts).
    pub rtoken: Address,
    /// Governor emitting `ProposalCreated` / `ProposalExecuted`.
    pub governor: Address,
}

/// Governance monitor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Watched pairs, in alert order.
    pub targets: Vec<GovernanceTarget>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                GovernanceTarget {
                    rtoken: EUSD,
                    governor: EUSD_GOVERNOR,
                },
                GovernanceTarget {
                    rtoken: HYUSD,
                    governor: HYUSD_GOVERNOR,
                },
                GovernanceTarget {
                    rtoken: ETH_PLUS,
                    governor: ETH_PLUS_GOVERNOR,
                },
            ],
        }
    }
}

impl GovernanceConfig {
    /// At least one target must be configured.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.targets.is_empty() {
            return Err(MonitorError::InvalidConfig(
                "no governance targets configured".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which lifecycle event a finding reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalStage {
    /// `ProposalCreated`
    Created,
    /// `ProposalExecuted`
    Executed,
}

impl ProposalStage {
    /// Display name of the finding.
    pub fn finding_name(self) -> &'static str {
        match self {
            ProposalStage::Created => "Governance Proposal Creation Monitor",
            ProposalStage::Executed => "Governance Proposal Execution Monitor",
        }
    }

    /// Alert id of the finding.
    pub fn alert_id(self) -> &'static str {
        match self {
            ProposalStage::Created => "RESERVE-PROPOSAL-CREATED",
            ProposalStage::Executed => "RESERVE-PROPOSAL-EXECUTED",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ProposalStage::Created => "created",
            ProposalStage::Executed => "executed",
        }
    }
}

/// One proposal event attributed to an RToken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalActivity {
    /// Lifecycle stage.
    pub stage: ProposalStage,
    /// RToken the governor belongs to.
    pub rtoken: Address,
    /// `name()` of the RToken.
    pub rtoken_name: String,
    /// Transaction that emitted the event.
    pub transaction_hash: TxHash,
    /// Proposal id.
    pub proposal_id: U256,
}

impl ProposalActivity {
    /// Render the finding.
    pub fn into_finding(self, block_number: u64) -> Finding {
        let tx = format!("{:#x}", self.transaction_hash);
        Finding::new(
            self.stage.finding_name(),
            format!(
                "Proposal {} on {} at transaction {} with Proposal ID {}",
                self.stage.verb(),
                self.rtoken_name,
                tx,
                self.proposal_id
            ),
            self.stage.alert_id(),
            FindingSeverity::Medium,
            FindingType::Info,
        )
        .with_metadata("rTokenAddress", format_address(&self.rtoken))
        .with_metadata("transactionHash", tx)
        .with_metadata("proposalId", self.proposal_id.to_string())
        .with_metadata("currentBlock", block_number.to_string())
    }
}
