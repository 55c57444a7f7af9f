//! # Monitor Handlers
//!
//! The invocation contract between the host and a monitor. A monitor is a
//! struct constructed once; the host calls it once per block or per
//! transaction and collects whatever findings it returns.

use async_trait::async_trait;

use crate::errors::MonitorError;
use crate::events::{BlockEvent, TransactionEvent};
use crate::finding::Finding;

/// A monitor evaluated once per new block.
#[async_trait]
pub trait BlockHandler: Send + Sync {
    /// Stable monitor name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Run one pass against the state at `block`.
    async fn handle_block(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError>;
}

/// A monitor evaluated once per observed transaction.
#[async_trait]
pub trait TransactionHandler: Send + Sync {
    /// Stable monitor name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Inspect one transaction.
    async fn handle_transaction(&self, tx: &TransactionEvent)
        -> Result<Vec<Finding>, MonitorError>;
}
