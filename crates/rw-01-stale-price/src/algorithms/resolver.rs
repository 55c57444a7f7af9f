//! # Registry Resolver
//!
//! Walks deployer registry → deployers → `RTokenCreated` events and flattens
//! the result into the RTokens to evaluate.
//!
//! Nothing is cached between passes; each pass re-reads history up to the
//! reference block.

use futures::future::join_all;
use shared_types::{format_address, Address, BlockRange};
use tracing::{debug, warn};

use crate::domain::{ManagedResource, StalePriceError};
use crate::ports::StalePriceChain;

/// Enumerate every RToken created by every registered deployer, up to and
/// including `reference_block`.
///
/// Results keep deployer order, then event order. Duplicates are kept.
/// A deployer whose logs cannot be read contributes nothing; a registry whose
/// logs cannot be read fails the pass.
pub async fn resolve<C>(
    chain: &C,
    registry: Address,
    reference_block: u64,
) -> Result<Vec<ManagedResource>, StalePriceError>
where
    C: StalePriceChain + ?Sized,
{
    let range = BlockRange::up_to(reference_block);

    let deployers: Vec<Address> = chain
        .deployment_registered(registry, range)
        .await
        .map_err(|source| StalePriceError::RegistryUnavailable { registry, source })?
        .into_iter()
        .map(|log| log.event.deployer)
        .collect();

    debug!(
        "[rw-01] Registry {} lists {} deployer(s)",
        format_address(&registry),
        deployers.len()
    );

    let per_deployer = join_all(
        deployers
            .iter()
            .map(|deployer| created_by(chain, *deployer, range)),
    )
    .await;

    Ok(per_deployer.into_iter().flatten().collect())
}

async fn created_by<C>(chain: &C, deployer: Address, range: BlockRange) -> Vec<ManagedResource>
where
    C: StalePriceChain + ?Sized,
{
    match chain.rtoken_created(deployer, range).await {
        Ok(logs) => logs
            .into_iter()
            .map(|log| ManagedResource {
                rtoken: log.event.rToken,
                main: log.event.main,
                deployer,
            })
            .collect(),
        Err(e) => {
            warn!(
                deployer = %format_address(&deployer),
                error = %e,
                "[rw-01] Skipping deployer whose RTokenCreated logs could not be read"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::contract_events::fixtures;
    use shared_types::in_memory::InMemoryChain;

    const REGISTRY: Address = Address::new([0xee; 20]);

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[tokio::test]
    async fn test_empty_registry_yields_nothing() {
        let chain = InMemoryChain::new();
        let resolved = resolve(&chain, REGISTRY, 100).await.unwrap();
        assert!(resolved.is_empty());
    }

    #[tokio::test]
    async fn test_resolves_in_deployer_then_event_order() {
        let chain = InMemoryChain::new()
            .with_log(fixtures::deployment_registered(REGISTRY, "2.1.0", addr(0xd1), 10))
            .with_log(fixtures::deployment_registered(REGISTRY, "3.0.0", addr(0xd2), 20))
            .with_log(fixtures::rtoken_created(addr(0xd2), addr(0x21), addr(0x22), addr(0x0f), 30))
            .with_log(fixtures::rtoken_created(addr(0xd1), addr(0x11), addr(0x12), addr(0x0f), 15))
            .with_log(fixtures::rtoken_created(addr(0xd1), addr(0x13), addr(0x14), addr(0x0f), 16));

        let resolved = resolve(&chain, REGISTRY, 100).await.unwrap();
        let rtokens: Vec<Address> = resolved.iter().map(|r| r.rtoken).collect();
        assert_eq!(rtokens, vec![addr(0x12), addr(0x14), addr(0x22)]);
        assert_eq!(resolved[0].main, addr(0x11));
        assert_eq!(resolved[2].deployer, addr(0xd2));
    }

    #[tokio::test]
    async fn test_events_after_reference_block_are_ignored() {
        let chain = InMemoryChain::new()
            .with_log(fixtures::deployment_registered(REGISTRY, "3.0.0", addr(0xd1), 10))
            .with_log(fixtures::rtoken_created(addr(0xd1), addr(0x11), addr(0x12), addr(0x0f), 50))
            .with_log(fixtures::rtoken_created(addr(0xd1), addr(0x13), addr(0x14), addr(0x0f), 51));

        let resolved = resolve(&chain, REGISTRY, 50).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].rtoken, addr(0x12));
    }

    #[tokio::test]
    async fn test_duplicate_registrations_are_not_deduplicated() {
        let chain = InMemoryChain::new()
            .with_log(fixtures::deployment_registered(REGISTRY, "3.0.0", addr(0xd1), 10))
            .with_log(fixtures::deployment_registered(REGISTRY, "3.0.0", addr(0xd1), 11))
            .with_log(fixtures::rtoken_created(addr(0xd1), addr(0x11), addr(0x12), addr(0x0f), 12));

        let resolved = resolve(&chain, REGISTRY, 100).await.unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_deployer_is_isolated() {
        let chain = InMemoryChain::new()
            .with_log(fixtures::deployment_registered(REGISTRY, "2.1.0", addr(0xd1), 10))
            .with_log(fixtures::deployment_registered(REGISTRY, "3.0.0", addr(0xd2), 20))
            .with_log(fixtures::rtoken_created(addr(0xd2), addr(0x21), addr(0x22), addr(0x0f), 30))
            .with_unreachable(addr(0xd1));

        let resolved = resolve(&chain, REGISTRY, 100).await.unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].rtoken, addr(0x22));
    }

    #[tokio::test]
    async fn test_failing_registry_fails_the_pass() {
        let chain = InMemoryChain::new().with_unreachable(REGISTRY);
        let err = resolve(&chain, REGISTRY, 100).await.unwrap_err();
        assert!(matches!(
            err,
            StalePriceError::RegistryUnavailable { registry, .. } if registry == REGISTRY
        ));
    }
}
