//! # Monitor Registry
//!
//! Holds every enabled monitor and dispatches events to them.
//!
//! ## Dispatch Rules
//!
//! - Monitors run one after another, in registration order.
//! - A failed pass is logged and counted; it never stops the other monitors.
//! - Every pass is timed into `rw_monitor_pass_duration_seconds`.

use std::sync::Arc;

use rw_01_stale_price::{StalePriceChain, StalePriceMonitor};
use rw_02_collateralization::{CollateralizationChain, CollateralizationMonitor};
use rw_03_governance::{GovernanceChain, GovernanceMonitor};
use rw_04_large_transfer::{LargeTransferChain, LargeTransferMonitor};
use rw_05_slow_wallet::SlowWalletMonitor;
use rw_telemetry::{monitor_span, record_finding, PassOutcome, PassTimer};
use shared_types::{
    BlockEvent, BlockHandler, Finding, MonitorError, TransactionEvent, TransactionHandler,
};
use tracing::{error, info, Instrument};

use crate::container::RuntimeConfig;

/// Every capability the built-in monitors read.
pub trait MonitorChain:
    StalePriceChain + CollateralizationChain + GovernanceChain + LargeTransferChain + 'static
{
}

impl<T> MonitorChain for T where
    T: StalePriceChain + CollateralizationChain + GovernanceChain + LargeTransferChain + 'static
{
}

/// Enabled monitors, split by trigger.
#[derive(Default)]
pub struct MonitorRegistry {
    block_handlers: Vec<Arc<dyn BlockHandler>>,
    transaction_handlers: Vec<Arc<dyn TransactionHandler>>,
}

impl MonitorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in monitors over `chain`, configured by `config`.
    ///
    /// The slow-wallet monitor is registered only when a wallet is configured.
    pub fn from_config<C: MonitorChain>(
        chain: Arc<C>,
        config: &RuntimeConfig,
    ) -> Result<Self, MonitorError> {
        let mut registry = Self::new();

        registry.register_block(Arc::new(StalePriceMonitor::new(
            Arc::clone(&chain),
            config.stale_price.clone(),
        )?));
        registry.register_block(Arc::new(CollateralizationMonitor::new(
            Arc::clone(&chain),
            config.collateralization.clone(),
        )?));
        registry.register_block(Arc::new(GovernanceMonitor::new(
            Arc::clone(&chain),
            config.governance.clone(),
        )?));
        registry.register_transaction(Arc::new(LargeTransferMonitor::new(
            Arc::clone(&chain),
            config.large_transfer.clone(),
        )?));
        if let Some(slow_wallet) = &config.slow_wallet {
            registry.register_transaction(Arc::new(SlowWalletMonitor::new(slow_wallet.clone())?));
        }

        info!(
            "[runtime] Registered monitors: {}",
            registry.monitor_names().join(", ")
        );
        Ok(registry)
    }

    /// Add a per-block monitor.
    pub fn register_block(&mut self, handler: Arc<dyn BlockHandler>) {
        self.block_handlers.push(handler);
    }

    /// Add a per-transaction monitor.
    pub fn register_transaction(&mut self, handler: Arc<dyn TransactionHandler>) {
        self.transaction_handlers.push(handler);
    }

    /// Names of all monitors, block monitors first.
    pub fn monitor_names(&self) -> Vec<&'static str> {
        self.block_handlers
            .iter()
            .map(|h| h.name())
            .chain(self.transaction_handlers.iter().map(|h| h.name()))
            .collect()
    }

    /// Whether any monitor needs transactions.
    pub fn wants_transactions(&self) -> bool {
        !self.transaction_handlers.is_empty()
    }

    /// Run every block monitor against `block`.
    pub async fn dispatch_block(&self, block: &BlockEvent) -> Vec<Finding> {
        let mut findings = Vec::new();
        for handler in &self.block_handlers {
            let timer = PassTimer::start(handler.name());
            let result = handler
                .handle_block(block)
                .instrument(monitor_span!(handler.name(), block = block.number))
                .await;
            findings.extend(settle(handler.name(), timer, result, || {
                format!("block {}", block.number)
            }));
        }
        findings
    }

    /// Run every transaction monitor against `tx`.
    pub async fn dispatch_transaction(&self, tx: &TransactionEvent) -> Vec<Finding> {
        let mut findings = Vec::new();
        for handler in &self.transaction_handlers {
            let timer = PassTimer::start(handler.name());
            let result = handler
                .handle_transaction(tx)
                .instrument(monitor_span!(handler.name(), tx = ?tx.hash))
                .await;
            findings.extend(settle(handler.name(), timer, result, || {
                format!("tx {:?}", tx.hash)
            }));
        }
        findings
    }
}

fn settle(
    monitor: &'static str,
    timer: PassTimer,
    result: Result<Vec<Finding>, MonitorError>,
    subject: impl FnOnce() -> String,
) -> Vec<Finding> {
    match result {
        Ok(findings) => {
            timer.finish(PassOutcome::Ok);
            for finding in &findings {
                record_finding(&finding.alert_id);
            }
            findings
        }
        Err(e) => {
            timer.finish(PassOutcome::Error);
            error!(monitor, "[runtime] Pass failed on {}: {}", subject(), e);
            Vec::new()
        }
    }
}
