//! # Contract Events
//!
//! One `sol!` event per signature the monitors consume, decoded from raw logs
//! with [`SolEvent::decode_log`]. `ReserveEvent` is the sum type over all of
//! them.
//!
//! | Event | Emitted by |
//! |-------|------------|
//! | `DeploymentRegistered` | Deployer registry |
//! | `RTokenCreated` | Deployer |
//! | `ProposalCreated` / `ProposalExecuted` | Governor |
//! | `Transfer` | Any ERC-20 |
//! | `TransferProposed` | Slow wallet |

use alloy::sol_types::SolEvent;

use crate::errors::ChainError;
use crate::events::LogEntry;
use crate::primitives::{Address, TxHash};

alloy::sol! {
    /// A deployer registered in the deployer registry.
    #[derive(Debug, PartialEq, Eq)]
    event DeploymentRegistered(string version, address deployer);

    /// An RToken deployed by a deployer.
    #[derive(Debug, PartialEq, Eq)]
    event RTokenCreated(
        address indexed main,
        address indexed rToken,
        address stRSR,
        address indexed owner,
        string version
    );

    /// OpenZeppelin Governor proposal creation.
    #[derive(Debug, PartialEq, Eq)]
    event ProposalCreated(
        uint256 proposalId,
        address proposer,
        address[] targets,
        uint256[] values,
        string[] signatures,
        bytes[] calldatas,
        uint256 voteStart,
        uint256 voteEnd,
        string description
    );

    /// OpenZeppelin Governor proposal execution.
    #[derive(Debug, PartialEq, Eq)]
    event ProposalExecuted(uint256 proposalId);

    /// ERC-20 transfer; `value` is raw, token decimals not applied.
    #[derive(Debug, PartialEq, Eq)]
    event Transfer(address indexed from, address indexed to, uint256 value);

    /// Slow-wallet transfer proposal; `delayUntil` is unix seconds.
    #[derive(Debug, PartialEq, Eq)]
    event TransferProposed(
        uint256 indexed index,
        address indexed destination,
        uint256 value,
        uint256 delayUntil,
        string notes
    );
}

/// A decoded event plus where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventLog<E> {
    /// Decoded arguments.
    pub event: E,
    /// Emitting contract.
    pub address: Address,
    /// Originating transaction.
    pub transaction_hash: TxHash,
    /// Block the log was included in.
    pub block_number: u64,
}

impl<E: SolEvent> EventLog<E> {
    /// Decode a raw log; topic0, topic count and data layout are all checked.
    pub fn from_log(log: &LogEntry) -> Result<Self, ChainError> {
        let decoded = E::decode_log(&log.inner, true)
            .map_err(|e| ChainError::Decode(format!("{}: {e}", E::SIGNATURE)))?;
        Ok(Self {
            event: decoded.data,
            address: decoded.address,
            transaction_hash: log.transaction_hash,
            block_number: log.block_number,
        })
    }
}

/// Every event kind the monitors understand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReserveEvent {
    /// Deployer registered in the registry.
    DeploymentRegistered(DeploymentRegistered),
    /// RToken deployed.
    RTokenCreated(RTokenCreated),
    /// Governance proposal created.
    ProposalCreated(ProposalCreated),
    /// Governance proposal executed.
    ProposalExecuted(ProposalExecuted),
    /// ERC-20 transfer.
    Transfer(Transfer),
    /// Slow-wallet transfer proposed.
    TransferProposed(TransferProposed),
}

impl ReserveEvent {
    /// Decode any known event. `Ok(None)` when topic0 is not one of ours.
    pub fn decode(log: &LogEntry) -> Result<Option<Self>, ChainError> {
        let Some(topic) = log.topic0() else {
            return Ok(None);
        };

        let event = if topic == DeploymentRegistered::SIGNATURE_HASH {
            Self::DeploymentRegistered(decode(log)?)
        } else if topic == RTokenCreated::SIGNATURE_HASH {
            Self::RTokenCreated(decode(log)?)
        } else if topic == ProposalCreated::SIGNATURE_HASH {
            Self::ProposalCreated(decode(log)?)
        } else if topic == ProposalExecuted::SIGNATURE_HASH {
            Self::ProposalExecuted(decode(log)?)
        } else if topic == Transfer::SIGNATURE_HASH {
            Self::Transfer(decode(log)?)
        } else if topic == TransferProposed::SIGNATURE_HASH {
            Self::TransferProposed(decode(log)?)
        } else {
            return Ok(None);
        };

        Ok(Some(event))
    }

    /// The canonical signature of this event kind.
    pub fn signature(&self) -> &'static str {
        match self {
            Self::DeploymentRegistered(_) => DeploymentRegistered::SIGNATURE,
            Self::RTokenCreated(_) => RTokenCreated::SIGNATURE,
            Self::ProposalCreated(_) => ProposalCreated::SIGNATURE,
            Self::ProposalExecuted(_) => ProposalExecuted::SIGNATURE,
            Self::Transfer(_) => Transfer::SIGNATURE,
            Self::TransferProposed(_) => TransferProposed::SIGNATURE,
        }
    }
}

fn decode<E: SolEvent>(log: &LogEntry) -> Result<E, ChainError> {
    EventLog::<E>::from_log(log).map(|decoded| decoded.event)
}

/// Builders for raw logs, used by the in-memory chain and tests.
pub mod fixtures {
    use super::*;
    use crate::primitives::{Log, B256, U256};

    fn log(address: Address, event: &impl SolEvent, tx: TxHash, block: u64) -> LogEntry {
        LogEntry::new(
            Log {
                address,
                data: event.encode_log_data(),
            },
            tx,
            block,
        )
    }

    fn block_tx(block: u64) -> TxHash {
        B256::left_padding_from(&block.to_be_bytes())
    }

    /// Raw `DeploymentRegistered` log.
    pub fn deployment_registered(registry: Address, version: &str, deployer: Address, block: u64) -> LogEntry {
        let event = DeploymentRegistered {
            version: version.to_string(),
            deployer,
        };
        log(registry, &event, block_tx(block), block)
    }

    /// Raw `RTokenCreated` log.
    pub fn rtoken_created(deployer: Address, main: Address, rtoken: Address, owner: Address, block: u64) -> LogEntry {
        let event = RTokenCreated {
            main,
            rToken: rtoken,
            stRSR: Address::ZERO,
            owner,
            version: "3.0.0".to_string(),
        };
        log(deployer, &event, block_tx(block), block)
    }

    /// Raw `ProposalCreated` log with empty call arrays.
    pub fn proposal_created(governor: Address, proposal_id: U256, proposer: Address, tx: TxHash, block: u64) -> LogEntry {
        let event = ProposalCreated {
            proposalId: proposal_id,
            proposer,
            targets: Vec::new(),
            values: Vec::new(),
            signatures: Vec::new(),
            calldatas: Vec::new(),
            voteStart: U256::from(block + 1),
            voteEnd: U256::from(block + 50_401),
            description: "Update basket".to_string(),
        };
        log(governor, &event, tx, block)
    }

    /// Raw `ProposalExecuted` log.
    pub fn proposal_executed(governor: Address, proposal_id: U256, tx: TxHash, block: u64) -> LogEntry {
        let event = ProposalExecuted {
            proposalId: proposal_id,
        };
        log(governor, &event, tx, block)
    }

    /// Raw ERC-20 `Transfer` log.
    pub fn transfer(token: Address, from: Address, to: Address, value: U256, tx: TxHash, block: u64) -> LogEntry {
        log(token, &Transfer { from, to, value }, tx, block)
    }

    /// Raw `TransferProposed` log.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer_proposed(
        wallet: Address,
        index: u64,
        destination: Address,
        value: U256,
        delay_until: u64,
        notes: &str,
        tx: TxHash,
        block: u64,
    ) -> LogEntry {
        let event = TransferProposed {
            index: U256::from(index),
            destination,
            value,
            delayUntil: U256::from(delay_until),
            notes: notes.to_string(),
        };
        log(wallet, &event, tx, block)
    }
}
