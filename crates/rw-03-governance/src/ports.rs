//! # Outbound Ports

use shared_types::contracts::{Erc20Reader, GovernorReader};

/// Chain access required by the governance monitor: `name()` of the RToken
/// and proposal logs of its governor.
pub trait GovernanceChain: Erc20Reader + GovernorReader {}

impl<T> GovernanceChain for T where T: Erc20Reader + GovernorReader {}
