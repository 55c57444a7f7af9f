//! Governance Service - per-block entry point

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use futures::try_join;
use shared_types::contract_events::{EventLog, ProposalCreated, ProposalExecuted};
use shared_types::{BlockEvent, BlockHandler, BlockRange, ChainError, Finding, MonitorError};
use tracing::{info, instrument};

use crate::domain::{GovernanceConfig, GovernanceTarget, ProposalActivity, ProposalStage};
use crate::ports::GovernanceChain;

/// Monitor name used in logs and metrics.
pub const MONITOR_NAME: &str = "governance";

struct TargetActivity {
    target: GovernanceTarget,
    name: String,
    created: Vec<EventLog<ProposalCreated>>,
    executed: Vec<EventLog<ProposalExecuted>>,
}

/// Governance monitor.
pub struct GovernanceMonitor<C: GovernanceChain> {
    chain: Arc<C>,
    config: GovernanceConfig,
}

impl<C: GovernanceChain> GovernanceMonitor<C> {
    /// Build a monitor; fails on an invalid configuration.
    pub fn new(chain: Arc<C>, config: GovernanceConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { chain, config })
    }

    async fn read_target(
        &self,
        target: GovernanceTarget,
        block: u64,
    ) -> Result<TargetActivity, ChainError> {
        let range = BlockRange::single(block);
        let (name, created, executed) = try_join!(
            self.chain.name(target.rtoken, block),
            self.chain.proposal_created(target.governor, range),
            self.chain.proposal_executed(target.governor, range),
        )?;
        Ok(TargetActivity {
            target,
            name,
            created,
            executed,
        })
    }

    /// Proposal activity in exactly `block`: every creation, then every
    /// execution, each in target order then log order.
    #[instrument(skip(self, block), fields(block = block.number))]
    pub async fn run_pass(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError> {
        let per_target = try_join_all(
            self.config
                .targets
                .iter()
                .map(|target| self.read_target(*target, block.number)),
        )
        .await?;

        let created = per_target.iter().flat_map(|t| {
            t.created.iter().map(move |log| ProposalActivity {
                stage: ProposalStage::Created,
                rtoken: t.target.rtoken,
                rtoken_name: t.name.clone(),
                transaction_hash: log.transaction_hash,
                proposal_id: log.event.proposalId,
            })
        });
        let executed = per_target.iter().flat_map(|t| {
            t.executed.iter().map(move |log| ProposalActivity {
                stage: ProposalStage::Executed,
                rtoken: t.target.rtoken,
                rtoken_name: t.name.clone(),
                transaction_hash: log.transaction_hash,
                proposal_id: log.event.proposalId,
            })
        });

        let findings: Vec<Finding> = created
            .chain(executed)
            .map(|activity| activity.into_finding(block.number))
            .collect();

        if !findings.is_empty() {
            info!(
                "[rw-03] Block {}: {} proposal event(s)",
                block.number,
                findings.len()
            );
        }

        Ok(findings)
    }
}

#[async_trait]
impl<C: GovernanceChain> BlockHandler for GovernanceMonitor<C> {
    fn name(&self) -> &'static str {
        MONITOR_NAME
    }

    async fn handle_block(&self, block: &BlockEvent) -> Result<Vec<Finding>, MonitorError> {
        self.run_pass(block).await
    }
}
