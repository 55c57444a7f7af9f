//! # Finding Aggregator
//!
//! Folds every stale RToken of a pass into one alert.

use shared_types::{format_address, Finding, FindingSeverity, FindingType};

use crate::domain::{EvaluationOutcome, StalePriceConfig};

/// Display name of the stale-price finding.
pub const FINDING_NAME: &str = "Asset Update Monitor";

/// Alert id of the stale-price finding.
pub const ALERT_ID: &str = "RESERVE-STALE-PRICE";

/// Zero findings when nothing is stale, otherwise exactly one listing every
/// stale RToken in evaluation order.
pub fn aggregate(
    outcomes: &[EvaluationOutcome],
    block_number: u64,
    config: &StalePriceConfig,
) -> Vec<Finding> {
    let stale: Vec<_> = outcomes.iter().filter_map(EvaluationOutcome::as_stale).collect();
    if stale.is_empty() {
        return Vec::new();
    }

    let names = stale
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let addresses = stale
        .iter()
        .map(|s| format_address(&s.rtoken))
        .collect::<Vec<_>>()
        .join(", ");

    let description = format!(
        "The following RTokens have not been updated in the last {} hours: {}",
        config.threshold_hours_label(),
        names
    );

    vec![Finding::new(
        FINDING_NAME,
        description,
        ALERT_ID,
        FindingSeverity::Medium,
        FindingType::Info,
    )
    .with_metadata("outdatedRTokens", addresses)
    .with_metadata("outdatedRTokenNames", names)
    .with_metadata("currentBlock", block_number.to_string())]
}
