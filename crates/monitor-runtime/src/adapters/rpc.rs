//! # Ethereum JSON-RPC Connection
//!
//! Builds the alloy HTTP provider and converts its errors and wire types into
//! `shared-types` values, so nothing else sees transport details.

use std::time::Duration;

use alloy::providers::{ProviderBuilder, RootProvider};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::{Block, Log as RpcLog, TransactionReceipt};
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportError};
use reqwest::{Client, Url};
use shared_types::{Address, BlockEvent, ChainError, LogEntry, TransactionEvent};

/// JSON-RPC error code geth and erigon use for `execution reverted`.
pub const EXECUTION_REVERTED: i64 = 3;

/// HTTP provider the runtime talks to.
pub type HttpProvider = RootProvider<Http<Client>>;

/// Connect to `url`; `timeout` bounds every request.
pub fn connect(url: &str, timeout: Duration) -> Result<HttpProvider, ChainError> {
    let url: Url = url
        .parse()
        .map_err(|e| ChainError::Transport(format!("invalid RPC URL {url}: {e}")))?;
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ChainError::Transport(e.to_string()))?;

    let rpc = RpcClient::new(Http::with_client(client, url), false);
    Ok(ProviderBuilder::new().on_client(rpc))
}

/// Map a provider error.
pub fn rpc_error(err: TransportError) -> ChainError {
    if let Some(payload) = err.as_error_resp() {
        return ChainError::Rpc {
            code: payload.code,
            message: payload.message.to_string(),
        };
    }
    match err {
        RpcError::DeserError { err, .. } => ChainError::Decode(err.to_string()),
        other => ChainError::Transport(other.to_string()),
    }
}

/// Map an `eth_call` error; a node-reported revert becomes `CallReverted`.
pub fn call_error(err: TransportError, contract: Address, method: &str) -> ChainError {
    match err.as_error_resp() {
        Some(payload) if is_revert(payload.code, &payload.message) => {
            ChainError::reverted(contract, method, payload.message.to_string())
        }
        _ => rpc_error(err),
    }
}

fn is_revert(code: i64, message: &str) -> bool {
    code == EXECUTION_REVERTED || message.to_lowercase().contains("revert")
}

/// Convert a mined log; pending logs carry no inclusion point and are refused.
pub fn log_entry(log: RpcLog) -> Result<LogEntry, ChainError> {
    let transaction_hash = log
        .transaction_hash
        .ok_or_else(|| ChainError::Decode("log without transactionHash".to_string()))?;
    let block_number = log
        .block_number
        .ok_or_else(|| ChainError::Decode("log without blockNumber".to_string()))?;
    Ok(LogEntry::new(log.inner, transaction_hash, block_number))
}

/// Header fields of a block.
pub fn block_event(block: &Block) -> BlockEvent {
    BlockEvent::new(
        block.header.inner.number,
        block.header.hash,
        block.header.inner.timestamp,
    )
}

/// One receipt as a transaction event within `block`.
pub fn transaction_event(
    receipt: &TransactionReceipt,
    block: BlockEvent,
) -> Result<TransactionEvent, ChainError> {
    let addresses = std::iter::once(receipt.from)
        .chain(receipt.to)
        .chain(receipt.contract_address);
    let logs = receipt
        .inner
        .logs()
        .iter()
        .cloned()
        .map(log_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TransactionEvent::new(
        receipt.transaction_hash,
        block,
        addresses,
        logs,
    ))
}
