//! # Outbound Ports

use shared_types::contracts::Erc20Reader;

/// Chain access required by the large-transfer monitor: `decimals()` of the
/// transferred token.
pub trait LargeTransferChain: Erc20Reader {}

impl<T> LargeTransferChain for T where T: Erc20Reader {}
