//! # Domain Errors
//!
//! Error types for the Stale Price monitor.

use shared_types::{format_address, Address, ChainError, MonitorError};
use thiserror::Error;

/// Stale-price pass errors.
#[derive(Debug, Error)]
pub enum StalePriceError {
    /// The root registry could not be enumerated.
    #[error("Deployer registry {} unavailable: {source}", format_address(.registry))]
    RegistryUnavailable {
        /// Registry address.
        registry: Address,
        /// Underlying read failure.
        source: ChainError,
    },

    /// A per-RToken read failed with something other than a revert.
    #[error("Chain read failed: {0}")]
    Chain(#[from] ChainError),

    /// Unusable configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StalePriceError> for MonitorError {
    fn from(err: StalePriceError) -> Self {
        match err {
            StalePriceError::RegistryUnavailable { registry, source } => {
                MonitorError::RegistryUnavailable {
                    registry: format_address(&registry),
                    source,
                }
            }
            StalePriceError::Chain(e) => MonitorError::Chain(e),
            StalePriceError::InvalidConfig(msg) => MonitorError::InvalidConfig(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_failure_maps_to_monitor_error() {
        let err = StalePriceError::RegistryUnavailable {
            registry: Address::repeat_byte(0x11),
            source: ChainError::Transport("timeout".into()),
        };
        assert!(err.to_string().contains("0x1111111111111111111111111111111111111111"));

        match MonitorError::from(err) {
            MonitorError::RegistryUnavailable { registry, source } => {
                assert_eq!(registry, "0x1111111111111111111111111111111111111111");
                assert_eq!(source, ChainError::Transport("timeout".into()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_chain_error_passes_through() {
        let err: StalePriceError = ChainError::Decode("short".into()).into();
        assert!(matches!(
            MonitorError::from(err),
            MonitorError::Chain(ChainError::Decode(_))
        ));
    }
}
