//! # Domain
//!
//! Configuration and the undercollateralization finding.

use serde::{Deserialize, Serialize};
use shared_types::mainnet::EUSD;
use shared_types::{format_address, Address, Finding, FindingSeverity, FindingType, MonitorError};

/// Display name of the finding.
pub const FINDING_NAME: &str = "Collateralization Monitor";

/// Alert id of the finding.
pub const ALERT_ID: &str = "RESERVE-UNDERCOLLATERALIZED";

/// Collateralization monitor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralizationConfig {
    /// RTokens checked every block, in alert order.
    pub rtokens: Vec<Address>,
}

impl Default for CollateralizationConfig {
    fn default() -> Self {
        Self { rtokens: vec![EUSD] }
    }
}

impl CollateralizationConfig {
    /// At least one RToken must be configured.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.rtokens.is_empty() {
            return Err(MonitorError::InvalidConfig(
                "no RTokens configured for the collateralization monitor".to_string(),
            ));
        }
        Ok(())
    }
}

/// Finding for an RToken whose basket handler reports it is not fully
/// collateralized.
pub fn undercollateralized_finding(rtoken: Address, block_number: u64) -> Finding {
    let rtoken = format_address(&rtoken);
    Finding::new(
        FINDING_NAME,
        format!("The RToken contract at address {rtoken} is undercollateralized"),
        ALERT_ID,
        FindingSeverity::High,
        FindingType::Suspicious,
    )
    .with_metadata("rTokenAddress", rtoken)
    .with_metadata("currentBlock", block_number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_watches_eusd() {
        let config = CollateralizationConfig::default();
        assert_eq!(config.rtokens, vec![EUSD]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_rejected() {
        let config = CollateralizationConfig { rtokens: vec![] };
        assert!(matches!(
            config.validate(),
            Err(MonitorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_finding_shape() {
        let finding = undercollateralized_finding(Address::repeat_byte(0x12), 42);
        assert_eq!(finding.alert_id, ALERT_ID);
        assert_eq!(finding.severity, FindingSeverity::High);
        assert_eq!(finding.finding_type, FindingType::Suspicious);
        assert_eq!(
            finding.description,
            "The RToken contract at address 0x1212121212121212121212121212121212121212 is undercollateralized"
        );
        assert_eq!(
            finding.meta("rTokenAddress"),
            Some("0x1212121212121212121212121212121212121212")
        );
        assert_eq!(finding.meta("currentBlock"), Some("42"));
    }
}
