//! # Findings
//!
//! The only artifact a monitor produces. Findings are built once and never
//! mutated after being returned to the host.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How urgent an alert is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingSeverity {
    /// Not classified.
    #[default]
    Unknown,
    /// Informational.
    Info,
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

/// What kind of condition an alert reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingType {
    /// Not classified.
    #[default]
    Unknown,
    /// Informational.
    Info,
    /// Suspicious activity.
    Suspicious,
    /// Degraded protocol state.
    Degraded,
    /// Active exploit.
    Exploit,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An alert record relayed to the alerting pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Monitor display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Stable alert identifier, e.g. `RESERVE-STALE-PRICE`.
    pub alert_id: String,
    /// Severity.
    pub severity: FindingSeverity,
    /// Classification.
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    /// Chain the finding refers to.
    pub protocol: String,
    /// Raw addresses, hashes and numbers backing the description.
    pub metadata: BTreeMap<String, String>,
}

impl Finding {
    /// Create a finding with empty metadata on `ethereum`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        alert_id: impl Into<String>,
        severity: FindingSeverity,
        finding_type: FindingType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            alert_id: alert_id.into(),
            severity,
            finding_type,
            protocol: "ethereum".to_string(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Metadata lookup.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_serializes_with_host_field_names() {
        let finding = Finding::new(
            "Collateralization Monitor",
            "undercollateralized",
            "RESERVE-UNDERCOLLATERALIZED",
            FindingSeverity::High,
            FindingType::Suspicious,
        )
        .with_metadata("currentBlock", "100");

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["alertId"], "RESERVE-UNDERCOLLATERALIZED");
        assert_eq!(json["type"], "Suspicious");
        assert_eq!(json["severity"], "High");
        assert_eq!(json["protocol"], "ethereum");
        assert_eq!(json["metadata"]["currentBlock"], "100");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(FindingSeverity::Critical > FindingSeverity::High);
        assert!(FindingSeverity::Info < FindingSeverity::Low);
        assert_eq!(FindingSeverity::Medium.to_string(), "Medium");
    }
}
