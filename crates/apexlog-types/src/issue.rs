use serde::{Deserialize, Serialize};

use crate::Nanos;

/// Severity of a log issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Runtime error reported in the log (fatal error, limit exception)
    Error,
    /// Part of the log is missing (skipped lines, size cap)
    Skip,
    /// Structure did not match expectations (unpaired entry/exit)
    Unexpected,
}

/// An anomaly found while parsing. `summary` is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub start_time: Nanos,
    pub summary: String,
    pub description: String,
    pub severity: Severity,
}

/// Overall status of a parsed log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Ready,
    Warning,
}

impl LogStatus {
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.is_empty() {
            LogStatus::Ready
        } else {
            LogStatus::Warning
        }
    }
}
