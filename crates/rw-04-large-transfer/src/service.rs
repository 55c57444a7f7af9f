//! Large Transfer Service - per-transaction entry point

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use shared_types::contract_events::{EventLog, Transfer};
use shared_types::{
    format_address, ChainError, Finding, MonitorError, TransactionEvent, TransactionHandler,
};
use tracing::{debug, info, instrument};

use crate::domain::{normalize, FindingCap, LargeTransfer, LargeTransferConfig};
use crate::ports::LargeTransferChain;

/// Monitor name used in logs and metrics.
pub const MONITOR_NAME: &str = "large-transfer";

/// Large-transfer monitor. Owns its finding cap for the life of the process.
pub struct LargeTransferMonitor<C: LargeTransferChain> {
    chain: Arc<C>,
    config: LargeTransferConfig,
    cap: FindingCap,
}

impl<C: LargeTransferChain> LargeTransferMonitor<C> {
    /// Build a monitor; fails on an invalid configuration.
    pub fn new(chain: Arc<C>, config: LargeTransferConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        let cap = FindingCap::new(config.finding_cap);
        Ok(Self { chain, config, cap })
    }

    /// The monitor's finding cap.
    pub fn cap(&self) -> &FindingCap {
        &self.cap
    }

    async fn measure(
        &self,
        log: &EventLog<Transfer>,
        block: u64,
    ) -> Result<LargeTransfer, ChainError> {
        let decimals = self.chain.decimals(log.address, block).await?;
        Ok(LargeTransfer {
            token: log.address,
            from: log.event.from,
            to: log.event.to,
            value: log.event.value,
            normalized: normalize(log.event.value, decimals)?,
        })
    }

    /// Inspect the `Transfer` logs of one transaction.
    #[instrument(skip(self, tx), fields(tx = ?tx.hash))]
    pub async fn run_pass(&self, tx: &TransactionEvent) -> Result<Vec<Finding>, MonitorError> {
        if self.cap.is_exhausted() {
            return Ok(Vec::new());
        }

        let inbound: Vec<EventLog<Transfer>> = tx
            .filter_log::<Transfer>()
            .into_iter()
            .filter(|log| log.event.to == self.config.target)
            .collect();
        if inbound.is_empty() {
            return Ok(Vec::new());
        }

        let block = tx.block.number;
        let measured = try_join_all(inbound.iter().map(|log| self.measure(log, block))).await?;

        let mut findings = Vec::new();
        for transfer in measured {
            if transfer.normalized <= self.config.threshold_units {
                debug!(
                    token = %format_address(&transfer.token),
                    normalized = %transfer.normalized,
                    "[rw-04] Transfer below threshold"
                );
                continue;
            }
            if !self.cap.try_reserve() {
                info!("[rw-04] Finding cap of {} reached", self.cap.limit());
                break;
            }
            findings.push(transfer.into_finding());
        }

        Ok(findings)
    }
}

#[async_trait]
impl<C: LargeTransferChain> TransactionHandler for LargeTransferMonitor<C> {
    fn name(&self) -> &'static str {
        MONITOR_NAME
    }

    async fn handle_transaction(
        &self,
        tx: &TransactionEvent,
    ) -> Result<Vec<Finding>, MonitorError> {
        self.run_pass(tx).await
    }
}
