//! # In-Memory Chain
//!
//! A fake chain implementing every capability trait from [`crate::contracts`].
//! Contract state is configured with consuming `with_*` builders; every read
//! is counted per method and per contract so tests can assert which calls a
//! monitor did (or did not) make.
//!
//! Every view read also records the block it was pinned to, so tests can
//! assert that a pass read all of its state at the block it was invoked for.
//!
//! Reads of unconfigured state behave like calls to a contract that does not
//! implement the method: they return [`ChainError::CallReverted`]. Addresses
//! marked unreachable fail every read with [`ChainError::Transport`].

use std::collections::{BTreeSet, HashMap, HashSet};

use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::contract_events::{
    DeploymentRegistered, EventLog, ProposalCreated, ProposalExecuted, RTokenCreated,
};
use crate::contracts::{
    methods, AssetReader, AssetRegistryReader, BasketHandlerReader, DeployerReader,
    DeployerRegistryReader, Erc20Reader, GovernorReader, MainReader, RTokenReader,
};
use crate::errors::ChainError;
use crate::events::{BlockRange, LogEntry};
use crate::primitives::{Address, U256};

#[derive(Default)]
struct ChainState {
    logs: Vec<LogEntry>,
    names: HashMap<Address, String>,
    supplies: HashMap<Address, U256>,
    decimals: HashMap<Address, U256>,
    mains: HashMap<Address, Address>,
    asset_registries: HashMap<Address, Address>,
    basket_handlers: HashMap<Address, Address>,
    erc20s: HashMap<Address, Vec<Address>>,
    assets: HashMap<(Address, Address), Address>,
    last_saves: HashMap<Address, U256>,
    collateralized: HashMap<Address, bool>,
    unreachable: HashSet<Address>,
}

/// In-memory implementation of all on-chain capabilities.
#[derive(Default)]
pub struct InMemoryChain {
    state: RwLock<ChainState>,
    calls: Mutex<HashMap<(&'static str, Address), usize>>,
    read_blocks: Mutex<BTreeSet<u64>>,
}

impl InMemoryChain {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw log.
    pub fn with_log(self, log: LogEntry) -> Self {
        self.state.write().logs.push(log);
        self
    }

    /// ERC-20 with `name()` and `totalSupply()`.
    pub fn with_token(self, token: Address, name: &str, supply: U256) -> Self {
        {
            let mut state = self.state.write();
            state.names.insert(token, name.to_string());
            state.supplies.insert(token, supply);
        }
        self
    }

    /// `decimals()` of an ERC-20.
    pub fn with_decimals(self, token: Address, decimals: u8) -> Self {
        self.state.write().decimals.insert(token, U256::from(decimals));
        self
    }

    /// `rtoken.main()`.
    pub fn with_main(self, rtoken: Address, main: Address) -> Self {
        self.state.write().mains.insert(rtoken, main);
        self
    }

    /// `main.assetRegistry()` and the registry's `erc20s()`.
    pub fn with_asset_registry(self, main: Address, registry: Address, erc20s: Vec<Address>) -> Self {
        {
            let mut state = self.state.write();
            state.asset_registries.insert(main, registry);
            state.erc20s.insert(registry, erc20s);
        }
        self
    }

    /// `registry.toAsset(erc20)`, and the asset's `lastSave()` when `Some`.
    pub fn with_asset(
        self,
        registry: Address,
        erc20: Address,
        asset: Address,
        last_save: Option<u64>,
    ) -> Self {
        {
            let mut state = self.state.write();
            state.assets.insert((registry, erc20), asset);
            if let Some(last_save) = last_save {
                state.last_saves.insert(asset, U256::from(last_save));
            }
        }
        self
    }

    /// `main.basketHandler()` and its `fullyCollateralized()`.
    pub fn with_basket_handler(self, main: Address, basket_handler: Address, collateralized: bool) -> Self {
        {
            let mut state = self.state.write();
            state.basket_handlers.insert(main, basket_handler);
            state.collateralized.insert(basket_handler, collateralized);
        }
        self
    }

    /// Every read touching `address` fails at the transport layer.
    pub fn with_unreachable(self, address: Address) -> Self {
        self.state.write().unreachable.insert(address);
        self
    }

    /// Update an asset's `lastSave()` in place.
    pub fn set_last_save(&self, asset: Address, last_save: u64) {
        self.state.write().last_saves.insert(asset, U256::from(last_save));
    }

    /// Update a basket handler's status in place.
    pub fn set_collateralized(&self, basket_handler: Address, collateralized: bool) {
        self.state.write().collateralized.insert(basket_handler, collateralized);
    }

    /// Total reads of `method` across all contracts.
    pub fn calls(&self, method: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|((m, _), _)| *m == method)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Reads of `method` on `contract`.
    pub fn calls_to(&self, method: &str, contract: Address) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|((m, c), _)| *m == method && *c == contract)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Total reads of any kind.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    /// Distinct blocks that view reads were pinned to, ascending.
    pub fn read_blocks(&self) -> Vec<u64> {
        self.read_blocks.lock().iter().copied().collect()
    }

    fn record(&self, method: &'static str, contract: Address) -> Result<(), ChainError> {
        *self.calls.lock().entry((method, contract)).or_default() += 1;
        if self.state.read().unreachable.contains(&contract) {
            return Err(ChainError::Transport(format!("connection refused ({method})")));
        }
        Ok(())
    }

    fn view<T: Clone>(
        &self,
        method: &'static str,
        contract: Address,
        block: u64,
        read: impl FnOnce(&ChainState) -> Option<T>,
    ) -> Result<T, ChainError> {
        self.read_blocks.lock().insert(block);
        self.record(method, contract)?;
        let state = self.state.read();
        read(&state).ok_or_else(|| ChainError::reverted(contract, method, "execution reverted"))
    }

    fn logs<E: SolEvent>(&self, address: Address, range: BlockRange) -> Result<Vec<EventLog<E>>, ChainError> {
        self.record(E::SIGNATURE, address)?;
        let topic = E::SIGNATURE_HASH;
        self.state
            .read()
            .logs
            .iter()
            .filter(|log| log.address() == address)
            .filter(|log| log.topic0() == Some(topic))
            .filter(|log| range.contains(log.block_number))
            .map(EventLog::<E>::from_log)
            .collect()
    }
}

#[async_trait]
impl DeployerRegistryReader for InMemoryChain {
    async fn deployment_registered(
        &self,
        registry: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<DeploymentRegistered>>, ChainError> {
        self.logs(registry, range)
    }
}

#[async_trait]
impl DeployerReader for InMemoryChain {
    async fn rtoken_created(
        &self,
        deployer: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<RTokenCreated>>, ChainError> {
        self.logs(deployer, range)
    }
}

#[async_trait]
impl Erc20Reader for InMemoryChain {
    async fn name(&self, token: Address, block: u64) -> Result<String, ChainError> {
        self.view(methods::NAME, token, block, |s| s.names.get(&token).cloned())
    }

    async fn total_supply(&self, token: Address, block: u64) -> Result<U256, ChainError> {
        self.view(methods::TOTAL_SUPPLY, token, block, |s| s.supplies.get(&token).copied())
    }

    async fn decimals(&self, token: Address, block: u64) -> Result<U256, ChainError> {
        self.view(methods::DECIMALS, token, block, |s| s.decimals.get(&token).copied())
    }
}

#[async_trait]
impl RTokenReader for InMemoryChain {
    async fn main(&self, rtoken: Address, block: u64) -> Result<Address, ChainError> {
        self.view(methods::MAIN, rtoken, block, |s| s.mains.get(&rtoken).copied())
    }
}

#[async_trait]
impl MainReader for InMemoryChain {
    async fn asset_registry(&self, main: Address, block: u64) -> Result<Address, ChainError> {
        self.view(methods::ASSET_REGISTRY, main, block, |s| s.asset_registries.get(&main).copied())
    }

    async fn basket_handler(&self, main: Address, block: u64) -> Result<Address, ChainError> {
        self.view(methods::BASKET_HANDLER, main, block, |s| s.basket_handlers.get(&main).copied())
    }
}

#[async_trait]
impl AssetRegistryReader for InMemoryChain {
    async fn erc20s(&self, registry: Address, block: u64) -> Result<Vec<Address>, ChainError> {
        self.view(methods::ERC20S, registry, block, |s| s.erc20s.get(&registry).cloned())
    }

    async fn to_asset(
        &self,
        registry: Address,
        erc20: Address,
        block: u64,
    ) -> Result<Address, ChainError> {
        self.view(methods::TO_ASSET, registry, block, |s| s.assets.get(&(registry, erc20)).copied())
    }
}

#[async_trait]
impl AssetReader for InMemoryChain {
    async fn last_save(&self, asset: Address, block: u64) -> Result<U256, ChainError> {
        self.view(methods::LAST_SAVE, asset, block, |s| s.last_saves.get(&asset).copied())
    }
}

#[async_trait]
impl BasketHandlerReader for InMemoryChain {
    async fn fully_collateralized(
        &self,
        basket_handler: Address,
        block: u64,
    ) -> Result<bool, ChainError> {
        self.view(methods::FULLY_COLLATERALIZED, basket_handler, block, |s| {
            s.collateralized.get(&basket_handler).copied()
        })
    }
}

#[async_trait]
impl GovernorReader for InMemoryChain {
    async fn proposal_created(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalCreated>>, ChainError> {
        self.logs(governor, range)
    }

    async fn proposal_executed(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalExecuted>>, ChainError> {
        self.logs(governor, range)
    }
}
