//! Finding sinks: where the driver relays findings.

use std::io::Write;

use parking_lot::Mutex;
use shared_types::Finding;
use tracing::error;

/// Destination for findings, called once per processed block.
pub trait FindingSink: Send + Sync {
    /// Relay the findings of one block, in emission order.
    fn emit(&self, findings: &[Finding]);
}

/// One JSON object per line on stdout.
#[derive(Debug, Default)]
pub struct JsonLinesSink;

impl FindingSink for JsonLinesSink {
    fn emit(&self, findings: &[Finding]) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for finding in findings {
            let written = serde_json::to_string(finding)
                .map_err(std::io::Error::from)
                .and_then(|line| writeln!(out, "{line}"));
            if let Err(e) = written {
                error!(alert_id = %finding.alert_id, "[runtime] Failed to write finding: {}", e);
            }
        }
    }
}

/// Keeps every finding in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    findings: Mutex<Vec<Finding>>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far.
    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }
}

impl FindingSink for MemorySink {
    fn emit(&self, findings: &[Finding]) {
        self.findings.lock().extend_from_slice(findings);
    }
}
