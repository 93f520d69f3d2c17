use apexlog_parser::{ParseSession, parse_debug_levels, parse_events};
use apexlog_types::{DebugLevel, GovernorLimits, Issue, LogEvent, LogStatus, Nanos};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::builder::build_tree;
use crate::{ParseOptions, Result, passes};

/// A parsed debug log: the call tree plus everything collected about the
/// log while building it.
#[derive(Debug, Clone, Serialize)]
pub struct ApexLog {
    /// Synthetic "Execution Root" node
    pub root: LogEvent,

    /// Input length in bytes
    pub size: usize,

    pub debug_levels: Vec<DebugLevel>,

    /// Sorted by start time
    pub issues: Vec<Issue>,

    /// Unknown tags and lines that could not be placed
    pub parsing_errors: Vec<String>,

    /// Largest CPU time reported by the log (ns)
    pub cpu_time: Nanos,

    /// Limit usage per namespace
    pub governor_limits: BTreeMap<String, GovernorLimits>,
}

impl ApexLog {
    pub fn status(&self) -> LogStatus {
        LogStatus::from_issues(&self.issues)
    }

    pub fn has_issue(&self, summary: &str) -> bool {
        self.issues.iter().any(|i| i.summary == summary)
    }
}

/// Parse `text` with the default options.
pub fn parse_log(text: &str) -> Result<ApexLog> {
    parse_log_with(text, &ParseOptions::default())
}

/// Tokenize `text`, build the call tree and run the passes enabled in
/// `options`. Fails only on a malformed event timestamp.
pub fn parse_log_with(text: &str, options: &ParseOptions) -> Result<ApexLog> {
    debug!(bytes = text.len(), "parsing apex log");

    let mut session = ParseSession::new();
    let events = parse_events(text, &mut session)?;
    let mut root = build_tree(events, &mut session);
    passes::run(&mut root, options);

    let report = session.into_report();
    let parsing_errors = if options.collect_parsing_errors {
        report.parsing_errors
    } else {
        Vec::new()
    };

    debug!(
        issues = report.issues.len(),
        parsing_errors = parsing_errors.len(),
        "parsed apex log"
    );

    Ok(ApexLog {
        root,
        size: text.len(),
        debug_levels: parse_debug_levels(text),
        issues: report.issues,
        parsing_errors,
        cpu_time: report.cpu_time,
        governor_limits: report.governor_limits,
    })
}
