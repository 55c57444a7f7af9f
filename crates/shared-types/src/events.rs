//! # Host Events
//!
//! What the host hands to a monitor: a block reference for per-block
//! monitors, or a transaction with its logs for per-transaction monitors.

use std::collections::HashSet;

use alloy::sol_types::SolEvent;

use crate::contract_events::EventLog;
use crate::primitives::{Address, Log, TxHash, B256};

/// A new block observed by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockEvent {
    /// Block number.
    pub number: u64,
    /// Block hash.
    pub hash: B256,
    /// Block timestamp in unix seconds.
    pub timestamp: u64,
}

impl BlockEvent {
    /// Create a block event.
    pub fn new(number: u64, hash: B256, timestamp: u64) -> Self {
        Self {
            number,
            hash,
            timestamp,
        }
    }
}

/// A raw log as returned by `eth_getLogs` or a transaction receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitter, topics and ABI-encoded data.
    pub inner: Log,
    /// Transaction that emitted the log.
    pub transaction_hash: TxHash,
    /// Block the log was included in.
    pub block_number: u64,
}

impl LogEntry {
    /// Wrap a log with its inclusion point.
    pub fn new(inner: Log, transaction_hash: TxHash, block_number: u64) -> Self {
        Self {
            inner,
            transaction_hash,
            block_number,
        }
    }

    /// Emitting contract.
    pub fn address(&self) -> Address {
        self.inner.address
    }

    /// Event signature hash, if the log has one.
    pub fn topic0(&self) -> Option<B256> {
        self.inner.topics().first().copied()
    }
}

/// Inclusive block range for log queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRange {
    /// First block (inclusive).
    pub from: u64,
    /// Last block (inclusive).
    pub to: u64,
}

impl BlockRange {
    /// All history up to and including `block`.
    pub fn up_to(block: u64) -> Self {
        Self { from: 0, to: block }
    }

    /// Exactly one block.
    pub fn single(block: u64) -> Self {
        Self {
            from: block,
            to: block,
        }
    }

    /// Whether `block` falls inside the range.
    pub fn contains(&self, block: u64) -> bool {
        block >= self.from && block <= self.to
    }
}

/// A transaction observed by the host, with its receipt logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionEvent {
    /// Transaction hash.
    pub hash: TxHash,
    /// Block containing the transaction.
    pub block: BlockEvent,
    /// Sender, recipient and every log emitter.
    pub addresses: HashSet<Address>,
    /// Receipt logs in emission order.
    pub logs: Vec<LogEntry>,
}

impl TransactionEvent {
    /// Build an event; `addresses` is extended with every log emitter.
    pub fn new(
        hash: TxHash,
        block: BlockEvent,
        addresses: impl IntoIterator<Item = Address>,
        logs: Vec<LogEntry>,
    ) -> Self {
        let mut addresses: HashSet<Address> = addresses.into_iter().collect();
        addresses.extend(logs.iter().map(LogEntry::address));
        Self {
            hash,
            block,
            addresses,
            logs,
        }
    }

    /// Whether the transaction touched `address`.
    pub fn touches(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    /// Decode every log matching `E`, in emission order.
    ///
    /// Logs that share the topic but not the layout (e.g. ERC-721 `Transfer`
    /// against the ERC-20 definition) are skipped.
    pub fn filter_log<E: SolEvent>(&self) -> Vec<EventLog<E>> {
        let topic = E::SIGNATURE_HASH;
        self.logs
            .iter()
            .filter(|log| log.topic0() == Some(topic))
            .filter_map(|log| match EventLog::<E>::from_log(log) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::debug!(
                        event = E::SIGNATURE,
                        tx = ?log.transaction_hash,
                        error = %e,
                        "skipping log with matching topic but different layout"
                    );
                    None
                }
            })
            .collect()
    }
}
