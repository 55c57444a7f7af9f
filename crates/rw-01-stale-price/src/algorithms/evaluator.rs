//! # Condition Evaluator
//!
//! Decides whether one RToken's price data is stale.
//!
//! ## Read order
//!
//! ```text
//! totalSupply() ──< min──→ Skipped(BelowMinimumSupply)
//!      │
//! main.assetRegistry() → erc20s()
//!      │
//! for erc20 in erc20s:  toAsset(erc20) → lastSave()   (lastSave revert → next)
//!      │
//! first success ──age > threshold──→ Stale (name() read here)
//!      │                 otherwise → Healthy
//! none ───────────────────────────→ Skipped(NoFreshnessSignal)
//! ```
//!
//! Only a `lastSave()` revert is tolerated. A failing `toAsset()` and any
//! transport, RPC or decode error fail the evaluation, and with it the pass.
//!
//! Every read is pinned to the block under evaluation.

use shared_types::{format_address, Address, BlockEvent, ChainError, U256};
use tracing::debug;

use crate::domain::{
    EvaluationOutcome, FreshnessProbe, ManagedResource, SkipReason, StalePriceConfig,
    StaleResource,
};
use crate::ports::StalePriceChain;

/// Evaluate one RToken against the state at `block`.
pub async fn evaluate<C>(
    chain: &C,
    config: &StalePriceConfig,
    resource: &ManagedResource,
    block: &BlockEvent,
) -> Result<EvaluationOutcome, ChainError>
where
    C: StalePriceChain + ?Sized,
{
    let at = block.number;
    let supply = chain.total_supply(resource.rtoken, at).await?;
    if supply < config.min_supply {
        debug!(
            rtoken = %format_address(&resource.rtoken),
            %supply,
            "[rw-01] Supply below minimum, skipping"
        );
        return Ok(EvaluationOutcome::Skipped(SkipReason::BelowMinimumSupply));
    }

    let registry = chain.asset_registry(resource.main, at).await?;
    let erc20s = chain.erc20s(registry, at).await?;

    let (asset, last_save) = match probe_freshness(chain, registry, &erc20s, at).await? {
        FreshnessProbe::Found {
            asset, last_save, ..
        } => (asset, last_save),
        FreshnessProbe::NoCandidate => {
            debug!(
                rtoken = %format_address(&resource.rtoken),
                members = erc20s.len(),
                "[rw-01] No asset exposes lastSave(), skipping"
            );
            return Ok(EvaluationOutcome::Skipped(SkipReason::NoFreshnessSignal));
        }
    };

    let age_secs = age(block.timestamp, last_save);
    if age_secs <= config.stale_threshold_secs {
        debug!(
            rtoken = %format_address(&resource.rtoken),
            age_secs,
            "[rw-01] Healthy"
        );
        return Ok(EvaluationOutcome::Healthy);
    }

    let name = chain.name(resource.rtoken, at).await?;
    debug!(
        rtoken = %format_address(&resource.rtoken),
        %name,
        asset = %format_address(&asset),
        age_secs,
        "[rw-01] Stale"
    );

    Ok(EvaluationOutcome::Stale(StaleResource {
        rtoken: resource.rtoken,
        name,
        asset,
        last_save,
        age_secs,
    }))
}

/// First-match search over the registry members, in order, at block `at`.
///
/// Members after the first successful `lastSave()` read are never queried.
/// Every registered ERC-20 maps to an asset, so `toAsset()` errors propagate.
pub async fn probe_freshness<C>(
    chain: &C,
    registry: Address,
    erc20s: &[Address],
    at: u64,
) -> Result<FreshnessProbe, ChainError>
where
    C: StalePriceChain + ?Sized,
{
    for erc20 in erc20s {
        let asset = chain.to_asset(registry, *erc20, at).await?;

        match chain.last_save(asset, at).await {
            Ok(last_save) => {
                return Ok(FreshnessProbe::Found {
                    erc20: *erc20,
                    asset,
                    last_save,
                })
            }
            Err(e) if e.is_call_failure() => {
                debug!(asset = %format_address(&asset), error = %e, "[rw-01] lastSave reverted");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(FreshnessProbe::NoCandidate)
}

/// Seconds between `last_save` and `now`; a save in the future has age zero.
fn age(now: u64, last_save: U256) -> u64 {
    match u64::try_from(last_save) {
        Ok(last_save) => now.saturating_sub(last_save),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::contracts::methods;
    use shared_types::in_memory::InMemoryChain;
    use shared_types::primitives::ether;
    use shared_types::B256;

    const NOW: u64 = 1_700_000_000;
    const HOUR: u64 = 3_600;
    const BLOCK: u64 = 18_500_000;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn at(timestamp: u64) -> BlockEvent {
        BlockEvent::new(BLOCK, B256::ZERO, timestamp)
    }

    fn resource() -> ManagedResource {
        ManagedResource {
            rtoken: addr(0x10),
            main: addr(0x11),
            deployer: addr(0xd1),
        }
    }

    /// RToken 0x10 / main 0x11 / registry 0x12 with the given members.
    fn chain_with(supply: U256, members: Vec<Address>) -> InMemoryChain {
        InMemoryChain::new()
            .with_token(addr(0x10), "Electronic Dollar", supply)
            .with_asset_registry(addr(0x11), addr(0x12), members)
    }

    #[test]
    fn test_age_saturates() {
        assert_eq!(age(100, U256::from(40u64)), 60);
        assert_eq!(age(100, U256::from(400u64)), 0);
        assert_eq!(age(100, U256::MAX), 0);
    }

    #[tokio::test]
    async fn test_below_minimum_supply_reads_nothing_else() {
        let chain = chain_with(ether(99), vec![addr(0x20)]);
        let outcome = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            EvaluationOutcome::Skipped(SkipReason::BelowMinimumSupply)
        );
        assert_eq!(chain.total_calls(), 1);
        assert_eq!(chain.calls(methods::TOTAL_SUPPLY), 1);
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = chain_with(ether(150), vec![addr(0x20), addr(0x21), addr(0x22)])
            .with_asset(addr(0x12), addr(0x20), addr(0x30), None)
            .with_asset(addr(0x12), addr(0x21), addr(0x31), Some(NOW - 7 * HOUR))
            .with_asset(addr(0x12), addr(0x22), addr(0x32), Some(NOW));

        let outcome = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap();

        let stale = outcome.as_stale().expect("stale");
        assert_eq!(stale.asset, addr(0x31));
        assert_eq!(stale.age_secs, 7 * HOUR);
        assert_eq!(stale.name, "Electronic Dollar");
        assert_eq!(chain.calls_to(methods::LAST_SAVE, addr(0x30)), 1);
        assert_eq!(chain.calls_to(methods::LAST_SAVE, addr(0x32)), 0);
        assert_eq!(chain.calls(methods::TO_ASSET), 2);
    }

    #[tokio::test]
    async fn test_to_asset_revert_fails_the_evaluation() {
        // Member 0x20 has no asset mapping; 0x21 would report 7 h stale.
        let chain = chain_with(ether(150), vec![addr(0x20), addr(0x21)])
            .with_asset(addr(0x12), addr(0x21), addr(0x31), Some(NOW - 7 * HOUR));

        let err = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap_err();
        assert!(err.is_call_failure());
        assert_eq!(chain.calls(methods::TO_ASSET), 1);
        assert_eq!(chain.calls(methods::LAST_SAVE), 0);
    }

    #[tokio::test]
    async fn test_every_read_is_pinned_to_the_evaluated_block() {
        let chain = chain_with(ether(150), vec![addr(0x20), addr(0x21)])
            .with_asset(addr(0x12), addr(0x20), addr(0x30), None)
            .with_asset(addr(0x12), addr(0x21), addr(0x31), Some(NOW - 7 * HOUR));

        let outcome = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap();
        assert!(outcome.as_stale().is_some());
        assert_eq!(chain.read_blocks(), vec![BLOCK]);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let at_threshold = NOW - 6 * HOUR;
        let chain = chain_with(ether(150), vec![addr(0x20)])
            .with_asset(addr(0x12), addr(0x20), addr(0x30), Some(at_threshold));

        let config = StalePriceConfig::default();
        let outcome = evaluate(&chain, &config, &resource(), &at(NOW)).await.unwrap();
        assert_eq!(outcome, EvaluationOutcome::Healthy);
        assert_eq!(chain.calls(methods::NAME), 0);

        chain.set_last_save(addr(0x30), at_threshold - 1);
        let outcome = evaluate(&chain, &config, &resource(), &at(NOW)).await.unwrap();
        assert!(outcome.as_stale().is_some());
    }

    #[tokio::test]
    async fn test_no_candidate_is_skipped() {
        let chain = chain_with(ether(150), vec![addr(0x20), addr(0x21)])
            .with_asset(addr(0x12), addr(0x20), addr(0x30), None)
            .with_asset(addr(0x12), addr(0x21), addr(0x31), None);

        let outcome = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            EvaluationOutcome::Skipped(SkipReason::NoFreshnessSignal)
        );
    }

    #[tokio::test]
    async fn test_empty_registry_is_skipped() {
        let chain = chain_with(ether(150), Vec::new());
        let outcome = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            EvaluationOutcome::Skipped(SkipReason::NoFreshnessSignal)
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_not_tolerated() {
        let chain = chain_with(ether(150), vec![addr(0x20), addr(0x21)])
            .with_asset(addr(0x12), addr(0x20), addr(0x30), Some(NOW))
            .with_asset(addr(0x12), addr(0x21), addr(0x31), Some(NOW))
            .with_unreachable(addr(0x30));

        let err = evaluate(&chain, &StalePriceConfig::default(), &resource(), &at(NOW))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Transport(_)));
        assert_eq!(chain.calls_to(methods::LAST_SAVE, addr(0x31)), 0);
    }

    #[test]
    fn test_probe_on_empty_member_list() {
        let chain = InMemoryChain::new();
        let probe = tokio_test::block_on(probe_freshness(&chain, addr(0x12), &[], BLOCK)).unwrap();
        assert_eq!(probe, FreshnessProbe::NoCandidate);
        assert_eq!(chain.total_calls(), 0);
    }
}
