//! # Outbound Ports
//!
//! Every contract role the pipeline touches, composed into one bound.
//!
//! | Role | Reads |
//! |------|-------|
//! | Deployer registry | `DeploymentRegistered` logs |
//! | Deployer | `RTokenCreated` logs |
//! | RToken | `totalSupply()`, `name()` |
//! | Main | `assetRegistry()` |
//! | Asset registry | `erc20s()`, `toAsset(address)` |
//! | Asset | `lastSave()` |

use shared_types::contracts::{
    AssetReader, AssetRegistryReader, DeployerReader, DeployerRegistryReader, Erc20Reader,
    MainReader,
};

/// Chain access required by the stale-price pipeline.
pub trait StalePriceChain:
    DeployerRegistryReader + DeployerReader + Erc20Reader + MainReader + AssetRegistryReader + AssetReader
{
}

impl<T> StalePriceChain for T where
    T: DeployerRegistryReader
        + DeployerReader
        + Erc20Reader
        + MainReader
        + AssetRegistryReader
        + AssetReader
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::in_memory::InMemoryChain;

    fn assert_chain<C: StalePriceChain>() {}

    #[test]
    fn test_in_memory_chain_satisfies_port() {
        assert_chain::<InMemoryChain>();
    }
}
