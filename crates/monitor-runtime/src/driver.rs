//! # Block Driver
//!
//! Polls the chain head and feeds every new block, then every transaction in
//! it, through the monitor registry.
//!
//! ```text
//! head() ──→ for n in next..=head
//!              ├─ block(n) ──→ dispatch_block
//!              └─ transactions(n) ──→ dispatch_transaction (each)
//!                                           │
//!                                           ↓
//!                                    FindingSink::emit
//! ```
//!
//! A block whose data cannot be fetched is retried on the next tick. Monitor
//! failures never hold the driver back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rw_telemetry::set_chain_head;
use shared_types::{BlockEvent, ChainError, TransactionEvent};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::adapters::FindingSink;
use crate::registry::MonitorRegistry;

/// Where blocks and transactions come from.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Latest block number.
    async fn head(&self) -> Result<u64, ChainError>;

    /// Header fields of block `number`.
    async fn block(&self, number: u64) -> Result<BlockEvent, ChainError>;

    /// Every transaction in `block`, with its logs.
    async fn transactions(&self, block: &BlockEvent) -> Result<Vec<TransactionEvent>, ChainError>;
}

/// Head-following driver.
pub struct BlockDriver<S: BlockSource> {
    source: Arc<S>,
    registry: MonitorRegistry,
    sink: Arc<dyn FindingSink>,
    poll_interval: Duration,
    next_block: Option<u64>,
}

impl<S: BlockSource> BlockDriver<S> {
    /// Create a driver; `start_block` of `None` begins at the first head seen.
    pub fn new(
        source: Arc<S>,
        registry: MonitorRegistry,
        sink: Arc<dyn FindingSink>,
        poll_interval: Duration,
        start_block: Option<u64>,
    ) -> Self {
        Self {
            source,
            registry,
            sink,
            poll_interval,
            next_block: start_block,
        }
    }

    /// Next block to process, once known.
    pub fn next_block(&self) -> Option<u64> {
        self.next_block
    }

    /// Run every monitor against block `number` and relay the findings.
    ///
    /// Returns how many findings were emitted.
    #[instrument(skip(self))]
    pub async fn process_block(&self, number: u64) -> Result<usize, ChainError> {
        let block = self.source.block(number).await?;
        let transactions = if self.registry.wants_transactions() {
            self.source.transactions(&block).await?
        } else {
            Vec::new()
        };

        let mut findings = self.registry.dispatch_block(&block).await;
        for tx in &transactions {
            findings.extend(self.registry.dispatch_transaction(tx).await);
        }

        debug!(
            "[runtime] Block {}: {} transaction(s), {} finding(s)",
            number,
            transactions.len(),
            findings.len()
        );
        self.sink.emit(&findings);
        Ok(findings.len())
    }

    /// Process every block up to the current head.
    ///
    /// Returns how many blocks were processed.
    pub async fn poll_once(&mut self) -> Result<u64, ChainError> {
        let head = self.source.head().await?;
        set_chain_head(head);

        let mut next = *self.next_block.get_or_insert(head);
        let mut processed = 0;
        while next <= head {
            if let Err(e) = self.process_block(next).await {
                warn!("[runtime] Block {} unavailable, retrying next tick: {}", next, e);
                break;
            }
            next += 1;
            processed += 1;
            self.next_block = Some(next);
        }
        Ok(processed)
    }

    /// Poll until `shutdown` flips to `true`.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "[runtime] Following chain head every {:?}",
            self.poll_interval
        );
        loop {
            if let Err(e) = self.poll_once().await {
                warn!("[runtime] Head poll failed: {}", e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[runtime] Shutdown signal received");
                        break;
                    }
                }
            }
        }
    }
}
