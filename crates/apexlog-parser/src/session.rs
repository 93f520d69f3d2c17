use apexlog_types::{GovernorLimits, Issue, Nanos, Severity};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Per-parse bookkeeping: issues, parsing errors and usage figures.
///
/// One session belongs to exactly one parse, so independent logs can be
/// parsed concurrently as long as each gets its own session.
#[derive(Debug, Default)]
pub struct ParseSession {
    /// Sorted by `start_time`, ties kept in insertion order
    issues: Vec<Issue>,

    /// Dedup keys of `issues`
    summaries: HashSet<String>,

    /// Unknown tags and stray lines
    parsing_errors: Vec<String>,

    /// Set once the log reports it hit the maximum size
    max_size_timestamp: Option<Nanos>,

    /// Largest CPU time reported by a limit usage block (ns)
    cpu_time: Nanos,

    /// Last reported limit usage per namespace
    governor_limits: BTreeMap<String, GovernorLimits>,
}

/// Everything a session collected, handed to the caller once the parse
/// is complete.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub issues: Vec<Issue>,
    pub parsing_errors: Vec<String>,
    pub cpu_time: Nanos,
    pub governor_limits: BTreeMap<String, GovernorLimits>,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue unless one with the same summary already exists.
    /// Returns whether the issue was added.
    pub fn record_issue(
        &mut self,
        start_time: Nanos,
        summary: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> bool {
        let summary = summary.into();
        if self.summaries.contains(&summary) {
            return false;
        }
        debug!(start_time, summary = %summary, ?severity, "log issue");

        self.summaries.insert(summary.clone());
        let issue = Issue {
            start_time,
            summary,
            description: description.into(),
            severity,
        };
        let idx = self.issues.partition_point(|i| i.start_time <= start_time);
        self.issues.insert(idx, issue);
        true
    }

    /// Replace the issue stored under `summary` (if any) with a fresh one
    /// at `start_time`.
    pub fn update_issue(
        &mut self,
        start_time: Nanos,
        summary: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) {
        let summary = summary.into();
        if self.summaries.remove(&summary) {
            self.issues.retain(|i| i.summary != summary);
        }
        self.record_issue(start_time, summary, description, severity);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn has_issue(&self, summary: &str) -> bool {
        self.summaries.contains(summary)
    }

    pub fn parsing_error(&mut self, message: impl Into<String>) {
        self.parsing_errors.push(message.into());
    }

    pub fn parsing_errors(&self) -> &[String] {
        &self.parsing_errors
    }

    pub fn set_max_size_timestamp(&mut self, timestamp: Nanos) {
        self.max_size_timestamp = Some(timestamp);
    }

    pub fn max_size_timestamp(&self) -> Option<Nanos> {
        self.max_size_timestamp
    }

    /// Keep the largest CPU time seen so far.
    pub fn observe_cpu_time(&mut self, cpu_time: Nanos) {
        self.cpu_time = self.cpu_time.max(cpu_time);
    }

    pub fn cpu_time(&self) -> Nanos {
        self.cpu_time
    }

    pub fn record_limits(&mut self, namespace: impl Into<String>, limits: GovernorLimits) {
        self.governor_limits.insert(namespace.into(), limits);
    }

    pub fn governor_limits(&self) -> &BTreeMap<String, GovernorLimits> {
        &self.governor_limits
    }

    pub fn into_report(self) -> SessionReport {
        SessionReport {
            issues: self.issues,
            parsing_errors: self.parsing_errors,
            cpu_time: self.cpu_time,
            governor_limits: self.governor_limits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_are_sorted_by_start_time() {
        let mut session = ParseSession::new();
        session.record_issue(30, "c", "", Severity::Unexpected);
        session.record_issue(10, "a", "", Severity::Skip);
        session.record_issue(20, "b", "", Severity::Error);

        let order: Vec<_> = session.issues().iter().map(|i| i.summary.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_summary_is_ignored() {
        let mut session = ParseSession::new();
        assert!(session.record_issue(10, "Unexpected-End", "first", Severity::Unexpected));
        assert!(!session.record_issue(5, "Unexpected-End", "second", Severity::Unexpected));

        assert_eq!(session.issues().len(), 1);
        assert_eq!(session.issues()[0].description, "first");
        assert_eq!(session.issues()[0].start_time, 10);
    }

    #[test]
    fn test_update_replaces_position() {
        let mut session = ParseSession::new();
        session.record_issue(10, "Max-Size-reached", "early", Severity::Skip);
        session.record_issue(20, "Other", "", Severity::Error);
        session.update_issue(50, "Max-Size-reached", "late", Severity::Skip);

        let issues = session.issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].summary, "Other");
        assert_eq!(issues[1].summary, "Max-Size-reached");
        assert_eq!(issues[1].start_time, 50);
        assert_eq!(issues[1].description, "late");
    }

    #[test]
    fn test_update_without_existing_records() {
        let mut session = ParseSession::new();
        session.update_issue(5, "Max-Size-reached", "", Severity::Skip);
        assert!(session.has_issue("Max-Size-reached"));
    }

    #[test]
    fn test_cpu_time_keeps_max() {
        let mut session = ParseSession::new();
        session.observe_cpu_time(5_000_000);
        session.observe_cpu_time(2_000_000);
        assert_eq!(session.cpu_time(), 5_000_000);
    }
}
