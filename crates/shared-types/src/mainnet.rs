//! # Mainnet RTokens
//!
//! Addresses of the RTokens monitored by default.

use crate::primitives::{address, Address};

/// Electronic Dollar.
pub const EUSD: Address = address!("A0d69E286B938e21CBf7E51D71F6A4c8918f482F");

/// High Yield USD.
pub const HYUSD: Address = address!("aCdf0DBA4B9839b96221a8487e9ca660a48212be");

/// ETH+.
pub const ETH_PLUS: Address = address!("E72B141DF173b999AE7c1aDcbF60Cc9833Ce56a8");
