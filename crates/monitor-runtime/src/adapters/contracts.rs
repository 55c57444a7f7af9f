//! # JSON-RPC Chain Adapter
//!
//! Implements every on-chain capability trait over an alloy provider.
//!
//! | Capability | JSON-RPC |
//! |------------|----------|
//! | View methods | `eth_call` at the requested block, `sol!` encoded |
//! | Events | `eth_getLogs` by emitter and topic0 |
//! | Blocks | `eth_blockNumber`, `eth_getBlockByNumber`, `eth_getBlockReceipts` |

use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::network::TransactionBuilder;
use alloy::providers::Provider;
use alloy::rpc::types::{BlockTransactionsKind, Filter, TransactionRequest};
use alloy::sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use shared_types::abi::{IAsset, IAssetRegistry, IBasketHandler, IMain, IRToken, IERC20};
use shared_types::contract_events::{
    DeploymentRegistered, EventLog, ProposalCreated, ProposalExecuted, RTokenCreated,
};
use shared_types::contracts::{
    AssetReader, AssetRegistryReader, BasketHandlerReader, DeployerReader, DeployerRegistryReader,
    Erc20Reader, GovernorReader, MainReader, RTokenReader,
};
use shared_types::{
    format_address, Address, BlockEvent, BlockRange, ChainError, TransactionEvent, U256,
};
use tracing::trace;

use super::rpc::{block_event, call_error, log_entry, rpc_error, transaction_event, HttpProvider};
use crate::driver::BlockSource;

/// All monitor capabilities backed by one JSON-RPC endpoint.
pub struct JsonRpcChain {
    provider: HttpProvider,
}

impl JsonRpcChain {
    /// Wrap a provider.
    pub fn new(provider: HttpProvider) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// `eth_call` of `call` on `contract` against the state at `block`.
    ///
    /// A revert, or empty return data from a contract that lacks the method,
    /// is reported as `CallReverted`.
    async fn view<C: SolCall>(
        &self,
        contract: Address,
        call: C,
        block: u64,
    ) -> Result<C::Return, ChainError> {
        trace!(contract = %format_address(&contract), method = C::SIGNATURE, block, "[runtime] eth_call");
        let request = TransactionRequest::default()
            .with_to(contract)
            .with_input(call.abi_encode());

        let output = self
            .provider
            .call(&request)
            .block(BlockId::number(block))
            .await
            .map_err(|e| call_error(e, contract, C::SIGNATURE))?;
        if output.is_empty() {
            return Err(ChainError::reverted(contract, C::SIGNATURE, "empty return data"));
        }

        C::abi_decode_returns(&output, true)
            .map_err(|e| ChainError::Decode(format!("{}: {e}", C::SIGNATURE)))
    }

    async fn events<E: SolEvent>(
        &self,
        emitter: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<E>>, ChainError> {
        let filter = Filter::new()
            .address(emitter)
            .event_signature(E::SIGNATURE_HASH)
            .from_block(range.from)
            .to_block(range.to);

        self.provider
            .get_logs(&filter)
            .await
            .map_err(rpc_error)?
            .into_iter()
            .map(|log| log_entry(log).and_then(|entry| EventLog::<E>::from_log(&entry)))
            .collect()
    }
}

#[async_trait]
impl DeployerRegistryReader for JsonRpcChain {
    async fn deployment_registered(
        &self,
        registry: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<DeploymentRegistered>>, ChainError> {
        self.events(registry, range).await
    }
}

#[async_trait]
impl DeployerReader for JsonRpcChain {
    async fn rtoken_created(
        &self,
        deployer: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<RTokenCreated>>, ChainError> {
        self.events(deployer, range).await
    }
}

#[async_trait]
impl Erc20Reader for JsonRpcChain {
    async fn name(&self, token: Address, block: u64) -> Result<String, ChainError> {
        Ok(self.view(token, IERC20::nameCall {}, block).await?._0)
    }

    async fn total_supply(&self, token: Address, block: u64) -> Result<U256, ChainError> {
        Ok(self.view(token, IERC20::totalSupplyCall {}, block).await?._0)
    }

    async fn decimals(&self, token: Address, block: u64) -> Result<U256, ChainError> {
        Ok(self.view(token, IERC20::decimalsCall {}, block).await?._0)
    }
}

#[async_trait]
impl RTokenReader for JsonRpcChain {
    async fn main(&self, rtoken: Address, block: u64) -> Result<Address, ChainError> {
        Ok(self.view(rtoken, IRToken::mainCall {}, block).await?._0)
    }
}

#[async_trait]
impl MainReader for JsonRpcChain {
    async fn asset_registry(&self, main: Address, block: u64) -> Result<Address, ChainError> {
        Ok(self.view(main, IMain::assetRegistryCall {}, block).await?._0)
    }

    async fn basket_handler(&self, main: Address, block: u64) -> Result<Address, ChainError> {
        Ok(self.view(main, IMain::basketHandlerCall {}, block).await?._0)
    }
}

#[async_trait]
impl AssetRegistryReader for JsonRpcChain {
    async fn erc20s(&self, registry: Address, block: u64) -> Result<Vec<Address>, ChainError> {
        Ok(self.view(registry, IAssetRegistry::erc20sCall {}, block).await?._0)
    }

    async fn to_asset(
        &self,
        registry: Address,
        erc20: Address,
        block: u64,
    ) -> Result<Address, ChainError> {
        Ok(self
            .view(registry, IAssetRegistry::toAssetCall { erc20 }, block)
            .await?
            ._0)
    }
}

#[async_trait]
impl AssetReader for JsonRpcChain {
    async fn last_save(&self, asset: Address, block: u64) -> Result<U256, ChainError> {
        Ok(self.view(asset, IAsset::lastSaveCall {}, block).await?._0)
    }
}

#[async_trait]
impl BasketHandlerReader for JsonRpcChain {
    async fn fully_collateralized(
        &self,
        basket_handler: Address,
        block: u64,
    ) -> Result<bool, ChainError> {
        Ok(self
            .view(basket_handler, IBasketHandler::fullyCollateralizedCall {}, block)
            .await?
            ._0)
    }
}

#[async_trait]
impl GovernorReader for JsonRpcChain {
    async fn proposal_created(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalCreated>>, ChainError> {
        self.events(governor, range).await
    }

    async fn proposal_executed(
        &self,
        governor: Address,
        range: BlockRange,
    ) -> Result<Vec<EventLog<ProposalExecuted>>, ChainError> {
        self.events(governor, range).await
    }
}

#[async_trait]
impl BlockSource for JsonRpcChain {
    async fn head(&self) -> Result<u64, ChainError> {
        self.provider.get_block_number().await.map_err(rpc_error)
    }

    async fn block(&self, number: u64) -> Result<BlockEvent, ChainError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number), BlockTransactionsKind::Hashes)
            .await
            .map_err(rpc_error)?
            .ok_or_else(|| ChainError::NotFound(format!("block {number}")))?;
        Ok(block_event(&block))
    }

    async fn transactions(&self, block: &BlockEvent) -> Result<Vec<TransactionEvent>, ChainError> {
        let receipts = self
            .provider
            .get_block_receipts(BlockId::number(block.number))
            .await
            .map_err(rpc_error)?
            .ok_or_else(|| ChainError::NotFound(format!("receipts of block {}", block.number)))?;
        receipts
            .iter()
            .map(|receipt| transaction_event(receipt, *block))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rpc::connect;
    use crate::registry::MonitorChain;
    use std::time::Duration;

    fn assert_monitor_chain<C: MonitorChain + BlockSource>() {}

    #[test]
    fn test_json_rpc_chain_serves_every_monitor() {
        assert_monitor_chain::<JsonRpcChain>();
    }

    #[tokio::test]
    async fn test_unreachable_node_is_a_transport_failure() {
        let provider = connect("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let chain = JsonRpcChain::new(provider);

        let err = chain.total_supply(Address::repeat_byte(1), 10).await.unwrap_err();
        assert!(matches!(err, ChainError::Transport(_)));
        assert!(!err.is_call_failure());
    }
}
