//! Slow Wallet Service - per-transaction entry point

use async_trait::async_trait;
use shared_types::contract_events::TransferProposed;
use shared_types::{format_address, Finding, MonitorError, TransactionEvent, TransactionHandler};
use tracing::{info, instrument};

use crate::domain::{proposal_finding, SlowWalletConfig};

/// Monitor name used in logs and metrics.
pub const MONITOR_NAME: &str = "slow-wallet";

/// Slow-wallet monitor. Reads nothing from the chain.
pub struct SlowWalletMonitor {
    config: SlowWalletConfig,
}

impl SlowWalletMonitor {
    /// Build a monitor; fails on an invalid configuration.
    pub fn new(config: SlowWalletConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SlowWalletConfig {
        &self.config
    }

    /// Proposals emitted by the wallet in `tx`, in log order.
    #[instrument(skip(self, tx), fields(tx = ?tx.hash))]
    pub fn run_pass(&self, tx: &TransactionEvent) -> Vec<Finding> {
        let wallet = self.config.wallet;
        if !tx.touches(&wallet) {
            return Vec::new();
        }

        let findings: Vec<Finding> = tx
            .filter_log::<TransferProposed>()
            .iter()
            .filter(|log| log.address == wallet)
            .map(|log| proposal_finding(&log.event))
            .collect();

        if !findings.is_empty() {
            info!(
                "[rw-05] {} transfer proposal(s) on {}",
                findings.len(),
                format_address(&wallet)
            );
        }
        findings
    }
}

#[async_trait]
impl TransactionHandler for SlowWalletMonitor {
    fn name(&self) -> &'static str {
        MONITOR_NAME
    }

    async fn handle_transaction(
        &self,
        tx: &TransactionEvent,
    ) -> Result<Vec<Finding>, MonitorError> {
        Ok(self.run_pass(tx))
    }
}
