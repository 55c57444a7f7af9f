//! # Runtime Configuration
//!
//! Unified configuration for the runtime and every monitor it hosts.
//!
//! Monitor configs start from their compiled-in defaults; only the knobs
//! listed below can be overridden from the environment.
//!
//! | Variable | Default | Effect |
//! |----------|---------|--------|
//! | `RW_RPC_URL` | `http://127.0.0.1:8545` | JSON-RPC endpoint |
//! | `RW_POLL_INTERVAL_MS` | `12000` | Head polling period |
//! | `RW_REQUEST_TIMEOUT_SECS` | `30` | HTTP client timeout |
//! | `RW_START_BLOCK` | chain head | First block processed |
//! | `RW_SLOW_WALLET_ADDRESS` | unset | Enables the slow-wallet monitor |
//! | `RW_STALE_THRESHOLD_HOURS` | `6` | Stale-price threshold |
//! | `RW_FINDING_CAP` | `5` | Large-transfer lifetime cap |

use std::str::FromStr;
use std::time::Duration;

use rw_01_stale_price::StalePriceConfig;
use rw_02_collateralization::CollateralizationConfig;
use rw_03_governance::GovernanceConfig;
use rw_04_large_transfer::LargeTransferConfig;
use rw_05_slow_wallet::SlowWalletConfig;
use shared_types::Address;
use thiserror::Error;

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default head polling period, one mainnet slot.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 12_000;

/// Default HTTP client timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Head polling period.
    pub poll_interval: Duration,
    /// HTTP client timeout; the only timeout on chain reads.
    pub request_timeout: Duration,
    /// First block to process; `None` starts at the head seen on startup.
    pub start_block: Option<u64>,
    /// Stale-price monitor.
    pub stale_price: StalePriceConfig,
    /// Collateralization monitor.
    pub collateralization: CollateralizationConfig,
    /// Governance monitor.
    pub governance: GovernanceConfig,
    /// Large-transfer monitor.
    pub large_transfer: LargeTransferConfig,
    /// Slow-wallet monitor; registered only when set.
    pub slow_wallet: Option<SlowWalletConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            start_block: None,
            stale_price: StalePriceConfig::default(),
            collateralization: CollateralizationConfig::default(),
            governance: GovernanceConfig::default(),
            large_transfer: LargeTransferConfig::default(),
            slow_wallet: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("RW_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "RW_POLL_INTERVAL_MS")? {
            if ms == 0 {
                return Err(invalid("RW_POLL_INTERVAL_MS", "0", "must be positive"));
            }
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "RW_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.start_block = parse_var(&lookup, "RW_START_BLOCK")?;

        if let Some(hours) = parse_var::<u64>(&lookup, "RW_STALE_THRESHOLD_HOURS")? {
            if hours == 0 {
                return Err(invalid("RW_STALE_THRESHOLD_HOURS", "0", "must be positive"));
            }
            config.stale_price = config
                .stale_price
                .with_threshold_hours(hours)
                .map_err(|e| invalid("RW_STALE_THRESHOLD_HOURS", &hours.to_string(), e.to_string()))?;
        }
        if let Some(cap) = parse_var::<usize>(&lookup, "RW_FINDING_CAP")? {
            if cap == 0 {
                return Err(invalid("RW_FINDING_CAP", "0", "must be at least 1"));
            }
            config.large_transfer.finding_cap = cap;
        }
        if let Some(raw) = lookup("RW_SLOW_WALLET_ADDRESS") {
            let wallet = raw
                .trim()
                .parse::<Address>()
                .map_err(|e| invalid("RW_SLOW_WALLET_ADDRESS", &raw, e.to_string()))?;
            config.slow_wallet = Some(SlowWalletConfig::new(wallet));
        }

        Ok(config)
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<RuntimeConfig, ConfigError> {
    RuntimeConfig::from_lookup(|key| std::env::var(key).ok())
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| invalid(var, &raw, e.to_string()))
        })
        .transpose()
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}
