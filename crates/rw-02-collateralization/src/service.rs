//! Collateralization Service - per-block entry point

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use shared_types::{format_address, Address, BlockEvent, BlockHandler, ChainError, Finding, MonitorError};
use tracing::{debug, info, instrument};

use crate::domain::{undercollateralized_finding, CollateralizationConfig};
use crate::ports::CollateralizationChain;

/// Monitor name used in logs and metrics.
pub const MONITOR_NAME: &str = "collateralization";

/// Collateralization monitor.
pub struct CollateralizationMonitor<C: CollateralizationChain> {
    chain: Arc<C>,
    config: CollateralizationConfig,
}

impl<C: CollateralizationChain> CollateralizationMonitor<C> {
    /// Build a monitor; fails on an invalid configuration.
    pub fn new(chain: Arc<C>, config: CollateralizationConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { chain, config })
    }

    /// Whether `rtoken` is fully collateralized as of `block`.
    pub async fn is_fully_collateralized(&self, rtoken: Address, block: u64) -> Result<bool, ChainError> {
        let main = self.chain.main(rtoken, block).await?;
        let basket_handler = self.chain.basket_handler(main, block).await?;
        let collateralized = self.chain.fully_collateralized(basket_handler, block).await?;
        debug!(
            rtoken = %format_address(&rtoken),
            collateralized,
            "[rw-02] Basket status"
        );
        Ok(collateralized)
    }

    /// One pass over every configured RToken.
    #[instrument(skip(self, block), fields(block = block.number))]
    pub async fn run_pass(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError> {
        let statuses = try_join_all(
            self.config
                .rtokens
                .iter()
                .map(|rtoken| self.is_fully_collateralized(*rtoken, block.number)),
        )
        .await?;

        let findings: Vec<Finding> = self
            .config
            .rtokens
            .iter()
            .zip(statuses)
            .filter(|(_, collateralized)| !collateralized)
            .map(|(rtoken, _)| undercollateralized_finding(*rtoken, block.number))
            .collect();

        if !findings.is_empty() {
            info!(
                "[rw-02] Block {}: {} RToken(s) undercollateralized",
                block.number,
                findings.len()
            );
        }

        Ok(findings)
    }
}

#[async_trait]
impl<C: CollateralizationChain> BlockHandler for CollateralizationMonitor<C> {
    fn name(&self) -> &'static str {
        MONITOR_NAME
    }

    async fn handle_block(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError> {
        self.run_pass(block).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::in_memory::InMemoryChain;
    use shared_types::B256;

    const RTOKEN: Address = Address::new([0x10; 20]);

    fn chain(collateralized: bool) -> InMemoryChain {
        InMemoryChain::new()
            .with_main(RTOKEN, Address::repeat_byte(0x11))
            .with_basket_handler(Address::repeat_byte(0x11), Address::repeat_byte(0x12), collateralized)
    }

    fn monitor(chain: InMemoryChain) -> CollateralizationMonitor<InMemoryChain> {
        let config = CollateralizationConfig {
            rtokens: vec![RTOKEN],
        };
        CollateralizationMonitor::new(Arc::new(chain), config).unwrap()
    }

    #[tokio::test]
    async fn test_follows_main_to_basket_handler() {
        let chain = Arc::new(chain(true));
        let monitor = CollateralizationMonitor::new(
            Arc::clone(&chain),
            CollateralizationConfig {
                rtokens: vec![RTOKEN],
            },
        )
        .unwrap();
        assert!(monitor.is_fully_collateralized(RTOKEN, 42).await.unwrap());
        assert_eq!(chain.read_blocks(), vec![42]);
    }

    #[tokio::test]
    async fn test_collateralized_rtoken_is_quiet() {
        let monitor = monitor(chain(true));
        let block = BlockEvent::new(1, B256::ZERO, 0);
        assert!(monitor.handle_block(&block).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_rtoken_fails_the_pass() {
        let monitor = monitor(InMemoryChain::new());
        let block = BlockEvent::new(1, B256::ZERO, 0);
        assert!(matches!(
            monitor.handle_block(&block).await,
            Err(MonitorError::Chain(ChainError::CallReverted { .. }))
        ));
    }
}
