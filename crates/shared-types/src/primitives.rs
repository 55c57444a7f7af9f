//! # Primitives
//!
//! Ethereum value types used across all monitors, re-exported from
//! `alloy::primitives` so monitor crates need no direct alloy dependency.

pub use alloy::primitives::{address, Address, Bytes, Log, LogData, TxHash, B256, U256};

/// Format an address with its EIP-55 mixed-case checksum.
pub fn format_address(address: &Address) -> String {
    address.to_checksum(None)
}

/// `units` whole tokens at 18 decimals.
pub fn ether(units: u64) -> U256 {
    U256::from(units) * U256::from(10u64).pow(U256::from(18u64))
}
