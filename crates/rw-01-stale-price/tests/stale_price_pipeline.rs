//! # Stale Price Pipeline Tests
//!
//! End-to-end passes of `StalePriceMonitor` over an in-memory chain.
//!
//! ## Test Categories
//!
//! 1. **Scenarios** - one deployer, one RToken, stale vs fresh
//! 2. **Batching** - several stale RTokens in one finding
//! 3. **Filtering** - supply minimum, missing freshness signal
//! 4. **Failures** - failing deployer vs failing registry

use std::sync::Arc;

use rw_01_stale_price::{StalePriceConfig, StalePriceMonitor, ALERT_ID};
use shared_types::contract_events::fixtures;
use shared_types::contracts::methods;
use shared_types::in_memory::InMemoryChain;
use shared_types::primitives::ether;
use shared_types::{Address, BlockEvent, BlockHandler, MonitorError, B256, U256};

// =============================================================================
// TEST HELPERS
// =============================================================================

const NOW: u64 = 1_700_000_000;
const HOUR: u64 = 3_600;
const BLOCK: u64 = 18_500_000;

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn registry() -> Address {
    addr(0xee)
}

fn block() -> BlockEvent {
    BlockEvent::new(BLOCK, B256::repeat_byte(0xbb), NOW)
}

fn config() -> StalePriceConfig {
    StalePriceConfig {
        registry: registry(),
        ..StalePriceConfig::default()
    }
}

/// One RToken `0x<n>0` with main `0x<n>1`, asset registry `0x<n>2`, a single
/// member `0x<n>3` and asset `0x<n>4`, created by `deployer`.
fn with_rtoken(
    chain: InMemoryChain,
    deployer: Address,
    n: u8,
    name: &str,
    supply: U256,
    last_save: Option<u64>,
) -> InMemoryChain {
    let base = n << 4;
    let (rtoken, main, asset_registry, erc20, asset) = (
        addr(base),
        addr(base | 1),
        addr(base | 2),
        addr(base | 3),
        addr(base | 4),
    );
    chain
        .with_log(fixtures::rtoken_created(deployer, main, rtoken, addr(0x0f), 100))
        .with_token(rtoken, name, supply)
        .with_asset_registry(main, asset_registry, vec![erc20])
        .with_asset(asset_registry, erc20, asset, last_save)
}

fn one_deployer() -> InMemoryChain {
    InMemoryChain::new().with_log(fixtures::deployment_registered(
        registry(),
        "3.0.0",
        addr(0xd1),
        10,
    ))
}

fn monitor(chain: InMemoryChain) -> (Arc<InMemoryChain>, StalePriceMonitor<InMemoryChain>) {
    let chain = Arc::new(chain);
    let monitor = StalePriceMonitor::new(Arc::clone(&chain), config()).unwrap();
    (chain, monitor)
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[tokio::test]
async fn test_rtoken_stale_for_seven_hours_alerts() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    );
    let (_, monitor) = monitor(chain);

    let findings = monitor.handle_block(&block()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].alert_id, ALERT_ID);
    assert_eq!(
        findings[0].description,
        "The following RTokens have not been updated in the last 6 hours: Electronic Dollar"
    );
    assert_eq!(
        findings[0].meta("outdatedRTokens"),
        Some("0x1010101010101010101010101010101010101010")
    );
    assert_eq!(findings[0].meta("currentBlock"), Some("18500000"));
}

#[tokio::test]
async fn test_pass_reads_state_at_the_processed_block() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    );
    let (chain, monitor) = monitor(chain);

    monitor.handle_block(&block()).await.unwrap();
    assert_eq!(chain.read_blocks(), vec![BLOCK]);
}

#[tokio::test]
async fn test_rtoken_saved_five_hours_ago_is_quiet() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 5 * HOUR),
    );
    let (chain, monitor) = monitor(chain);

    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
    assert_eq!(chain.calls(methods::NAME), 0);
}

#[tokio::test]
async fn test_exactly_at_threshold_is_quiet() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 6 * HOUR),
    );
    let (_, monitor) = monitor(chain);

    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_state_change_between_passes() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    );
    let (chain, monitor) = monitor(chain);

    assert_eq!(monitor.handle_block(&block()).await.unwrap().len(), 1);

    chain.set_last_save(addr(0x14), NOW - HOUR);
    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
}

// =============================================================================
// BATCHING
// =============================================================================

#[tokio::test]
async fn test_all_stale_rtokens_in_one_finding() {
    let chain = one_deployer().with_log(fixtures::deployment_registered(
        registry(),
        "3.1.0",
        addr(0xd2),
        20,
    ));
    let chain = with_rtoken(chain, addr(0xd1), 1, "Electronic Dollar", ether(150), Some(NOW - 7 * HOUR));
    let chain = with_rtoken(chain, addr(0xd1), 2, "Fresh Dollar", ether(150), Some(NOW));
    let chain = with_rtoken(chain, addr(0xd2), 3, "High Yield USD", ether(500), Some(NOW - 30 * HOUR));
    let (_, monitor) = monitor(chain);

    let findings = monitor.handle_block(&block()).await.unwrap();

    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].meta("outdatedRTokenNames"),
        Some("Electronic Dollar, High Yield USD")
    );
    assert_eq!(
        findings[0].meta("outdatedRTokens"),
        Some(
            "0x1010101010101010101010101010101010101010, \
             0x3030303030303030303030303030303030303030"
        )
    );
}

// =============================================================================
// FILTERING
// =============================================================================

#[tokio::test]
async fn test_small_rtoken_never_read_past_supply() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Tiny Dollar",
        ether(99),
        Some(NOW - 30 * HOUR),
    );
    let (chain, monitor) = monitor(chain);

    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
    assert_eq!(chain.calls_to(methods::TOTAL_SUPPLY, addr(0x10)), 1);
    assert_eq!(chain.calls(methods::ASSET_REGISTRY), 0);
    assert_eq!(chain.calls(methods::ERC20S), 0);
    assert_eq!(chain.calls(methods::TO_ASSET), 0);
    assert_eq!(chain.calls(methods::LAST_SAVE), 0);
    assert_eq!(chain.calls(methods::NAME), 0);
}

#[tokio::test]
async fn test_rtoken_without_freshness_signal_is_quiet() {
    let chain = with_rtoken(one_deployer(), addr(0xd1), 1, "Electronic Dollar", ether(150), None);
    let (_, monitor) = monitor(chain);

    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_threshold_override() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    );
    let monitor =
        StalePriceMonitor::new(Arc::new(chain), config().with_threshold_hours(12).unwrap()).unwrap();

    assert!(monitor.handle_block(&block()).await.unwrap().is_empty());
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn test_failing_deployer_does_not_hide_others() {
    let chain = one_deployer()
        .with_log(fixtures::deployment_registered(registry(), "3.1.0", addr(0xd2), 20))
        .with_unreachable(addr(0xd1));
    let chain = with_rtoken(chain, addr(0xd1), 1, "Electronic Dollar", ether(150), Some(NOW - 7 * HOUR));
    let chain = with_rtoken(chain, addr(0xd2), 2, "High Yield USD", ether(150), Some(NOW - 7 * HOUR));
    let (_, monitor) = monitor(chain);

    let findings = monitor.handle_block(&block()).await.unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].meta("outdatedRTokenNames"), Some("High Yield USD"));
}

#[tokio::test]
async fn test_failing_registry_fails_the_pass() {
    let chain = with_rtoken(
        one_deployer().with_unreachable(registry()),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    );
    let (_, monitor) = monitor(chain);

    let err = monitor.handle_block(&block()).await.unwrap_err();
    assert!(matches!(err, MonitorError::RegistryUnavailable { .. }));
}

#[tokio::test]
async fn test_transport_failure_on_one_rtoken_fails_the_pass() {
    let chain = with_rtoken(
        one_deployer(),
        addr(0xd1),
        1,
        "Electronic Dollar",
        ether(150),
        Some(NOW - 7 * HOUR),
    )
    .with_unreachable(addr(0x11));
    let (_, monitor) = monitor(chain);

    let err = monitor.handle_block(&block()).await.unwrap_err();
    assert!(matches!(err, MonitorError::Chain(_)));
}
