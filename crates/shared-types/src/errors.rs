//! # Error Types
//!
//! Errors shared by every monitor: `ChainError` for anything that crosses the
//! provider boundary, `MonitorError` for a failed pass.

use crate::primitives::{format_address, Address};
use thiserror::Error;

/// Errors returned by on-chain reads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// The transport failed before a JSON-RPC response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message from the node.
        message: String,
    },

    /// The contract call reverted, or the contract does not implement the method.
    #[error("Call reverted: {method} on {contract}: {reason}")]
    CallReverted {
        /// Contract address (checksummed).
        contract: String,
        /// Method signature, e.g. `lastSave()`.
        method: String,
        /// Revert reason if the node reported one.
        reason: String,
    },

    /// The response could not be decoded into the expected type.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The requested block or object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ChainError {
    /// Build a `CallReverted` error for `method` on `contract`.
    pub fn reverted(contract: Address, method: &str, reason: impl Into<String>) -> Self {
        ChainError::CallReverted {
            contract: format_address(&contract),
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the call itself failed on-chain (revert / unsupported method).
    ///
    /// Transport, RPC and decode failures are not call failures.
    pub fn is_call_failure(&self) -> bool {
        matches!(self, ChainError::CallReverted { .. })
    }
}

/// Errors that abort a monitor pass.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// An on-chain read failed.
    #[error("Chain read failed: {0}")]
    Chain(#[from] ChainError),

    /// The root registry could not be enumerated.
    #[error("Registry {registry} unavailable: {source}")]
    RegistryUnavailable {
        /// Registry address (checksummed).
        registry: String,
        /// Underlying read failure.
        #[source]
        source: ChainError,
    },

    /// The monitor was constructed with an unusable configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reverts_are_call_failures() {
        let reverted = ChainError::reverted(Address::ZERO, "lastSave()", "execution reverted");
        assert!(reverted.is_call_failure());

        assert!(!ChainError::Transport("connection refused".into()).is_call_failure());
        assert!(!ChainError::Decode("short word".into()).is_call_failure());
        assert!(!ChainError::Rpc {
            code: -32005,
            message: "limit exceeded".into()
        }
        .is_call_failure());
    }

    #[test]
    fn test_reverted_error_message() {
        let err = ChainError::reverted(Address::repeat_byte(0x11), "lastSave()", "no data");
        let msg = err.to_string();
        assert!(msg.contains("lastSave()"));
        assert!(msg.contains("0x1111111111111111111111111111111111111111"));
    }

    #[test]
    fn test_chain_error_converts_into_monitor_error() {
        let err: MonitorError = ChainError::NotFound("block 12".into()).into();
        assert!(err.to_string().contains("block 12"));
    }
}
