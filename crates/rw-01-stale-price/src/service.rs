//! Stale Price Service - per-block entry point
//!
//! resolve → evaluate (concurrently) → aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use shared_types::{BlockEvent, BlockHandler, Finding, MonitorError};
use tracing::{info, instrument};

use crate::algorithms::{aggregate, evaluate, resolve};
use crate::domain::{EvaluationOutcome, StalePriceConfig, StalePriceError};
use crate::ports::StalePriceChain;

/// Monitor name used in logs and metrics.
pub const MONITOR_NAME: &str = "stale-price";

/// Stale price monitor.
pub struct StalePriceMonitor<C: StalePriceChain> {
    chain: Arc<C>,
    config: StalePriceConfig,
}

impl<C: StalePriceChain> StalePriceMonitor<C> {
    /// Build a monitor; fails on an invalid configuration.
    pub fn new(chain: Arc<C>, config: StalePriceConfig) -> Result<Self, StalePriceError> {
        config.validate()?;
        Ok(Self { chain, config })
    }

    /// Active configuration.
    pub fn config(&self) -> &StalePriceConfig {
        &self.config
    }

    /// One full pass against the state at `block`.
    #[instrument(skip(self, block), fields(block = block.number))]
    pub async fn run_pass(&self, block: &BlockEvent) -> Result<Vec<Finding>, StalePriceError> {
        let resources = resolve(self.chain.as_ref(), self.config.registry, block.number).await?;

        let outcomes = try_join_all(
            resources
                .iter()
                .map(|resource| evaluate(self.chain.as_ref(), &self.config, resource, block)),
        )
        .await?;

        let stale = outcomes
            .iter()
            .filter(|o| matches!(o, EvaluationOutcome::Stale(_)))
            .count();
        info!(
            "[rw-01] Block {}: {} RToken(s) evaluated, {} stale",
            block.number,
            resources.len(),
            stale
        );

        Ok(aggregate(&outcomes, block.number, &self.config))
    }
}

#[async_trait]
impl<C: StalePriceChain> BlockHandler for StalePriceMonitor<C> {
    fn name(&self) -> &'static str {
        MONITOR_NAME
    }

    async fn handle_block(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError> {
        self.run_pass(block).await.map_err(MonitorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::in_memory::InMemoryChain;
    use shared_types::B256;

    #[test]
    fn test_invalid_config_rejected() {
        let config = StalePriceConfig {
            stale_threshold_secs: 0,
            ..StalePriceConfig::default()
        };
        assert!(StalePriceMonitor::new(Arc::new(InMemoryChain::new()), config).is_err());
    }

    #[tokio::test]
    async fn test_empty_chain_yields_no_findings() {
        let monitor =
            StalePriceMonitor::new(Arc::new(InMemoryChain::new()), StalePriceConfig::default())
                .unwrap();
        let block = BlockEvent::new(100, B256::ZERO, 1_700_000_000);

        assert_eq!(monitor.name(), MONITOR_NAME);
        assert!(monitor.handle_block(&block).await.unwrap().is_empty());
    }
}
