//! # Runtime Dispatch Tests
//!
//! The built-in monitors wired over an in-memory chain and driven block by
//! block, as the binary does against a node.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use monitor_runtime::{BlockDriver, BlockSource, MemorySink, MonitorRegistry, RuntimeConfig};
use rw_05_slow_wallet::SlowWalletConfig;
use shared_types::contract_events::fixtures;
use shared_types::in_memory::InMemoryChain;
use shared_types::mainnet::{ETH_PLUS, EUSD, HYUSD};
use shared_types::{
    Address, BlockEvent, ChainError, TransactionEvent, TransactionHandler, B256, U256,
};

const HEAD: u64 = 18_000_000;

fn wallet() -> Address {
    Address::repeat_byte(0x5a)
}

fn main_of_eusd() -> Address {
    Address::repeat_byte(0x10)
}

fn basket_handler() -> Address {
    Address::repeat_byte(0x11)
}

fn chain(collateralized: bool) -> Arc<InMemoryChain> {
    Arc::new(
        InMemoryChain::new()
            .with_token(EUSD, "Electronic Dollar", U256::ZERO)
            .with_token(HYUSD, "High Yield USD", U256::ZERO)
            .with_token(ETH_PLUS, "ETHPlus", U256::ZERO)
            .with_main(EUSD, main_of_eusd())
            .with_basket_handler(main_of_eusd(), basket_handler(), collateralized),
    )
}

fn config() -> RuntimeConfig {
    RuntimeConfig {
        slow_wallet: Some(SlowWalletConfig::new(wallet())),
        ..RuntimeConfig::default()
    }
}

fn proposal_tx(block: BlockEvent) -> TransactionEvent {
    let log = fixtures::transfer_proposed(
        wallet(),
        4,
        Address::repeat_byte(0xde),
        U256::from(500u64),
        1_700_086_400,
        "ops",
        B256::repeat_byte(0xcc),
        block.number,
    );
    TransactionEvent::new(B256::repeat_byte(0xcc), block, [wallet()], vec![log])
}

struct OneBlock;

#[async_trait]
impl BlockSource for OneBlock {
    async fn head(&self) -> Result<u64, ChainError> {
        Ok(HEAD)
    }

    async fn block(&self, number: u64) -> Result<BlockEvent, ChainError> {
        Ok(BlockEvent::new(number, B256::repeat_byte(0x01), 1_700_000_000))
    }

    async fn transactions(&self, block: &BlockEvent) -> Result<Vec<TransactionEvent>, ChainError> {
        Ok(vec![proposal_tx(*block)])
    }
}

#[test]
fn test_slow_wallet_registered_only_when_configured() {
    let with = MonitorRegistry::from_config(chain(true), &config()).unwrap();
    assert_eq!(
        with.monitor_names(),
        vec![
            "stale-price",
            "collateralization",
            "governance",
            "large-transfer",
            "slow-wallet"
        ]
    );

    let without = MonitorRegistry::from_config(chain(true), &RuntimeConfig::default()).unwrap();
    assert!(!without.monitor_names().contains(&"slow-wallet"));
}

#[tokio::test]
async fn test_quiet_block_emits_nothing() {
    let registry = MonitorRegistry::from_config(chain(true), &config()).unwrap();
    let findings = registry
        .dispatch_block(&BlockEvent::new(HEAD, B256::ZERO, 1_700_000_000))
        .await;
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_driver_relays_block_and_transaction_findings() {
    let registry = MonitorRegistry::from_config(chain(false), &config()).unwrap();
    let sink = Arc::new(MemorySink::new());
    let mut driver = BlockDriver::new(
        Arc::new(OneBlock),
        registry,
        sink.clone(),
        Duration::from_millis(10),
        None,
    );

    assert_eq!(driver.poll_once().await.unwrap(), 1);

    let alert_ids: Vec<_> = sink
        .findings()
        .into_iter()
        .map(|f| f.alert_id)
        .collect();
    assert_eq!(
        alert_ids,
        vec![
            rw_02_collateralization::ALERT_ID.to_string(),
            rw_05_slow_wallet::ALERT_ID.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failing_monitor_does_not_block_others() {
    // Governance cannot read hyUSD's name; the other monitors still report.
    let chain = Arc::new(
        InMemoryChain::new()
            .with_token(EUSD, "Electronic Dollar", U256::ZERO)
            .with_main(EUSD, main_of_eusd())
            .with_basket_handler(main_of_eusd(), basket_handler(), false),
    );
    let registry = MonitorRegistry::from_config(chain, &config()).unwrap();

    let findings = registry
        .dispatch_block(&BlockEvent::new(HEAD, B256::ZERO, 1_700_000_000))
        .await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].alert_id, rw_02_collateralization::ALERT_ID);
}

#[tokio::test]
async fn test_transaction_dispatch_matches_direct_handler() {
    let registry = MonitorRegistry::from_config(chain(true), &config()).unwrap();
    let tx = proposal_tx(BlockEvent::new(HEAD, B256::ZERO, 1_700_000_000));

    let via_registry = registry.dispatch_transaction(&tx).await;
    let direct = rw_05_slow_wallet::SlowWalletMonitor::new(SlowWalletConfig::new(wallet()))
        .unwrap()
        .handle_transaction(&tx)
        .await
        .unwrap();
    assert_eq!(via_registry, direct);
}
