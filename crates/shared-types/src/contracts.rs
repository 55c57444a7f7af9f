//! # On-Chain Capabilities
//!
//! One trait per contract role. A monitor states which roles it reads by
//! bounding its chain type on exactly those traits; the runtime's JSON-RPC
//! adapter and the in-memory chain implement all of them.
//!
//! ```text
//! DeployerRegistry ──DeploymentRegistered──→ Deployer ──RTokenCreated──→ RToken / Main
//!                                                                          │
//!                                       Main.assetRegistry() ──→ AssetRegistry
//!                                                                          │
//!                                       erc20s() / toAsset() ──→ Asset.lastSave()
//! ```
//!
//! Every view read takes the number of the block whose state it reads. A pass
//! reads all of its state at the block it was invoked for, so a driver that
//! catches up on old blocks sees each one as it was.

use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::abi::{IAsset, IAssetRegistry, IBasketHandler, IERC20, IMain, IRToken};
use crate::contract_events::{
    DeploymentRegistered, EventLog, ProposalCreated, ProposalExecuted, RTokenCreated,
};
use crate::errors::ChainError;
use crate::events::BlockRange;
use crate::primitives::{Address, U256};

/// Canonical view-method signatures, taken from the `sol!` bindings.
pub mod methods {
    use super::*;

    /// `ERC20.name()`
    pub const NAME: &str = <IERC20::nameCall as SolCall>::SIGNATURE;
    /// `ERC20.totalSupply()`
    pub const TOTAL_SUPPLY: &str = <IERC20::totalSupplyCall as SolCall>::SIGNATURE;
    /// `ERC20.decimals()`
    pub const DECIMALS: &str = <IERC20::decimalsCall as SolCall>::SIGNATURE;
    /// `RToken.main()`
    pub const MAIN: &str = <IRToken::mainCall as SolCall>::SIGNATURE;
    /// `Main.assetRegistry()`
    pub const ASSET_REGISTRY: &str = <IMain::assetRegistryCall as SolCall>::SIGNATURE;
    /// `Main.basketHandler()`
    pub const BASKET_HANDLER: &str = <IMain::basketHandlerCall as SolCall>::SIGNATURE;
    /// `AssetRegistry.erc20s()`
    pub const ERC20S: &str = <IAssetRegistry::erc20sCall as SolCall>::SIGNATURE;
    /// `AssetRegistry.toAsset(address)`
    pub const TO_ASSET: &str = <IAssetRegistry::toAssetCall as SolCall>::SIGNATURE;
    /// `Asset.lastSave()`
    pub const LAST_SAVE: &str = <IAsset::lastSaveCall as SolCall>::SIGNATURE;
    /// `BasketHandler.fullyCollateralized()`
    pub const FULLY_COLLATERALIZED: &str =
        <IBasketHandler::fullyCollateralizedCall as SolCall>::SIGNATURE;
}

/// Deployer registry: enumerates registered deployers.
#[async_trait]
pub trait DeployerRegistryReader: Send + Sync {
    /// `DeploymentRegistered` events emitted by `registry` within `range`.
    async fn deployment_registered(
        &self,
        registry: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<DeploymentRegistered>>, ChainError>;
}

/// Deployer: enumerates the RTokens it created.
#[async_trait]
pub trait DeployerReader: Send + Sync {
    /// `RTokenCreated` events emitted by `deployer` within `range`.
    async fn rtoken_created(
        &self,
        deployer: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<RTokenCreated>>, ChainError>;
}

/// ERC-20 metadata and supply.
#[async_trait]
pub trait Erc20Reader: Send + Sync {
    /// `name()`
    async fn name(&self, token: Address, block: u64) -> Result<String, ChainError>;

    /// `totalSupply()`
    async fn total_supply(&self, token: Address, block: u64) -> Result<U256, ChainError>;

    /// `decimals()`
    async fn decimals(&self, token: Address, block: u64) -> Result<U256, ChainError>;
}

/// RToken: link to its `Main`.
#[async_trait]
pub trait RTokenReader: Send + Sync {
    /// `main()`
    async fn main(&self, rtoken: Address, block: u64) -> Result<Address, ChainError>;
}

/// Main: component directory of an RToken.
#[async_trait]
pub trait MainReader: Send + Sync {
    /// `assetRegistry()`
    async fn asset_registry(&self, main: Address, block: u64) -> Result<Address, ChainError>;

    /// `basketHandler()`
    async fn basket_handler(&self, main: Address, block: u64) -> Result<Address, ChainError>;
}

/// Asset registry: the RToken's registered collateral and assets.
#[async_trait]
pub trait AssetRegistryReader: Send + Sync {
    /// `erc20s()`, in registry order.
    async fn erc20s(&self, registry: Address, block: u64) -> Result<Vec<Address>, ChainError>;

    /// `toAsset(erc20)`
    async fn to_asset(
        &self,
        registry: Address,
        erc20: Address,
        block: u64,
    ) -> Result<Address, ChainError>;
}

/// Asset plugin: price freshness.
#[async_trait]
pub trait AssetReader: Send + Sync {
    /// `lastSave()`; reverts on assets that do not track it.
    async fn last_save(&self, asset: Address, block: u64) -> Result<U256, ChainError>;
}

/// Basket handler: collateralization status.
#[async_trait]
pub trait BasketHandlerReader: Send + Sync {
    /// `fullyCollateralized()`
    async fn fully_collateralized(
        &self,
        basket_handler: Address,
        block: u64,
    ) -> Result<bool, ChainError>;
}

/// Governor: proposal lifecycle events.
#[async_trait]
pub trait GovernorReader: Send + Sync {
    /// `ProposalCreated` events emitted by `governor` within `range`.
    async fn proposal_created(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalCreated>>, ChainError>;

    /// `ProposalExecuted` events emitted by `governor` within `range`.
    async fn proposal_executed(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalExecuted>>, ChainError>;
}
