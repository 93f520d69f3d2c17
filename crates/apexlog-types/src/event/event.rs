use serde::{Deserialize, Serialize};

use super::payload::EventPayload;
use super::role::{Category, EventRole};

/// Nanoseconds since the start of the transaction, as printed in
/// parentheses on every log line.
pub type Nanos = i64;

/// Tag of the synthetic root node.
pub const ROOT_TYPE: &str = "ROOT";

// NOTE: Node Design
//
// Every event kind shares one struct. Structural behaviour is driven by
// `role` and `exit_types`; type-specific values live in `payload`.
// Timing and rollup fields are only meaningful for `EventRole::Begin`
// nodes and stay zeroed on leaves.

/// Source line reference carried by entry/exit lines: `[42]` or `[EXTERNAL]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineNumber {
    Line(u32),
    External,
}

impl LineNumber {
    /// Parse the bracketed line reference field. Returns None for fields
    /// that are not line references.
    pub fn parse(field: &str) -> Option<Self> {
        let inner = field.strip_prefix('[')?.strip_suffix(']')?;
        if inner == "EXTERNAL" {
            return Some(LineNumber::External);
        }
        inner.parse().ok().map(LineNumber::Line)
    }
}

/// Total and self time of a timed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Duration {
    pub total: Nanos,
    /// Total minus the children's totals. Negative only for malformed input.
    pub self_time: Nanos,
}

/// Rollup counters for a node and its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub dml_count: u32,
    pub soql_count: u32,
    pub thrown_count: u32,
    pub dml_rows: u64,
    pub soql_rows: u64,
    pub row_count: u64,
}

impl Totals {
    pub fn add(&mut self, other: &Totals) {
        self.dml_count = self.dml_count.saturating_add(other.dml_count);
        self.soql_count = self.soql_count.saturating_add(other.soql_count);
        self.thrown_count = self.thrown_count.saturating_add(other.thrown_count);
        self.dml_rows = self.dml_rows.saturating_add(other.dml_rows);
        self.soql_rows = self.soql_rows.saturating_add(other.soql_rows);
        self.row_count = self.row_count.saturating_add(other.row_count);
    }
}

/// One semantic unit parsed from a log line, and a node of the call tree.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Type tag (METHOD_ENTRY, DML_BEGIN, ...)
    pub event_type: &'static str,

    pub timestamp: Nanos,

    /// Timestamp of the event that closed this node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_stamp: Option<Nanos>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<LineNumber>,

    /// Display text
    pub text: String,

    /// The full source line, plus any continuation lines
    pub raw_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub role: EventRole,

    pub category: Category,

    /// Tags that legally close this node. Empty for leaves.
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub exit_types: &'static [&'static str],

    /// Whether trailing lines without a tag belong to this event
    #[serde(skip)]
    pub accepts_text: bool,

    /// Set on exception markers: the stack may unwind out of order after this
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub discontinuity: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_truncated: bool,

    #[serde(skip_serializing_if = "is_none_payload")]
    pub payload: EventPayload,

    pub duration: Duration,

    pub totals: Totals,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LogEvent>,
}

fn is_none_payload(payload: &EventPayload) -> bool {
    matches!(payload, EventPayload::None)
}

impl LogEvent {
    pub fn new(event_type: &'static str, timestamp: Nanos, role: EventRole) -> Self {
        Self {
            event_type,
            timestamp,
            exit_stamp: None,
            line_number: None,
            text: String::new(),
            raw_text: String::new(),
            namespace: None,
            role,
            category: Category::None,
            exit_types: &[],
            accepts_text: false,
            discontinuity: false,
            is_truncated: false,
            payload: EventPayload::None,
            duration: Duration::default(),
            totals: Totals::default(),
            children: Vec::new(),
        }
    }

    pub fn basic(event_type: &'static str, timestamp: Nanos) -> Self {
        Self::new(event_type, timestamp, EventRole::Basic)
    }

    pub fn exit(event_type: &'static str, timestamp: Nanos) -> Self {
        Self::new(event_type, timestamp, EventRole::Exit)
    }

    /// A begin event closed by any of `exit_types`.
    pub fn begin(
        event_type: &'static str,
        timestamp: Nanos,
        exit_types: &'static [&'static str],
    ) -> Self {
        let mut event = Self::new(event_type, timestamp, EventRole::Begin);
        event.exit_types = exit_types;
        event
    }

    /// The synthetic "Execution Root" node.
    pub fn root() -> Self {
        let mut root = Self::new(ROOT_TYPE, 0, EventRole::Begin);
        root.text = "Execution Root".to_string();
        root
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_line_number(mut self, line_number: Option<LineNumber>) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn accepting_text(mut self) -> Self {
        self.accepts_text = true;
        self
    }

    pub fn discontinuous(mut self) -> Self {
        self.discontinuity = true;
        self
    }

    pub fn is_exit(&self) -> bool {
        self.role == EventRole::Exit
    }

    /// Whether the node can own children and carries timing.
    pub fn is_timed(&self) -> bool {
        self.role == EventRole::Begin
    }

    /// Begin event that expects a matching exit.
    pub fn opens_frame(&self) -> bool {
        self.is_timed() && !self.exit_types.is_empty()
    }

    pub fn is_closed_by(&self, event_type: &str) -> bool {
        self.exit_types.contains(&event_type)
    }

    /// Append a continuation line to both the raw and display text.
    pub fn append_text(&mut self, line: &str) {
        self.raw_text.push('\n');
        self.raw_text.push_str(line);
        self.text.push('\n');
        self.text.push_str(line);
    }

    /// Two-phase close: adopt payload values from the matching exit line.
    pub fn finalize_with(&mut self, exit: &LogEvent) {
        let Some(exit_rows) = exit.payload.exit_rows() else {
            return;
        };
        match &mut self.payload {
            EventPayload::Soql { rows, .. } | EventPayload::Sosl { rows } => *rows = exit_rows,
            _ => {}
        }
    }

    /// `exit_stamp` when set, otherwise the event's own timestamp.
    pub fn end_stamp(&self) -> Nanos {
        self.exit_stamp.unwrap_or(self.timestamp)
    }

    /// Recompute total and self time from `exit_stamp` and the children.
    /// Nodes without an exit stamp keep a zero duration. Arithmetic
    /// saturates at the `Nanos` range.
    pub fn recalculate_durations(&mut self) {
        let total = match self.exit_stamp {
            Some(exit) => exit.saturating_sub(self.timestamp),
            None => 0,
        };
        let children_total = self
            .children
            .iter()
            .fold(0, |sum: Nanos, c| sum.saturating_add(c.duration.total));
        self.duration = Duration {
            total,
            self_time: total.saturating_sub(children_total),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_parse() {
        assert_eq!(LineNumber::parse("[42]"), Some(LineNumber::Line(42)));
        assert_eq!(LineNumber::parse("[EXTERNAL]"), Some(LineNumber::External));
        assert_eq!(LineNumber::parse("42"), None);
        assert_eq!(LineNumber::parse("[abc]"), None);
    }

    #[test]
    fn test_recalculate_durations() {
        let mut parent = LogEvent::begin("METHOD_ENTRY", 100, &["METHOD_EXIT"]);
        parent.exit_stamp = Some(200);
        let mut child = LogEvent::begin("METHOD_ENTRY", 120, &["METHOD_EXIT"]);
        child.exit_stamp = Some(150);
        child.recalculate_durations();
        parent.children.push(child);
        parent.recalculate_durations();

        assert_eq!(parent.duration.total, 100);
        assert_eq!(parent.duration.self_time, 70);
    }

    #[test]
    fn test_open_node_has_no_duration() {
        let mut node = LogEvent::begin("DML_BEGIN", 10, &["DML_END"]);
        node.recalculate_durations();
        assert_eq!(node.duration, Duration::default());
    }

    #[test]
    fn test_finalize_adopts_rows() {
        let mut soql = LogEvent::begin("SOQL_EXECUTE_BEGIN", 0, &["SOQL_EXECUTE_END"])
            .with_payload(EventPayload::Soql {
                aggregations: 0,
                rows: 0,
            });
        let end = LogEvent::exit("SOQL_EXECUTE_END", 5)
            .with_payload(EventPayload::QueryEnd { rows: 7 });
        soql.finalize_with(&end);
        assert_eq!(
            soql.payload,
            EventPayload::Soql {
                aggregations: 0,
                rows: 7
            }
        );
    }

    #[test]
    fn test_leaf_begin_does_not_open_frame() {
        let pkg = LogEvent::begin("ENTERING_MANAGED_PKG", 0, &[]);
        assert!(pkg.is_timed());
        assert!(!pkg.opens_frame());
    }

    #[test]
    fn test_append_text() {
        let mut event = LogEvent::basic("USER_DEBUG", 0).with_text("first");
        event.raw_text = "raw|first".to_string();
        event.append_text("second");
        assert_eq!(event.text, "first\nsecond");
        assert_eq!(event.raw_text, "raw|first\nsecond");
    }

    #[test]
    fn test_durations_saturate_on_extreme_stamps() {
        let mut node = LogEvent::begin("METHOD_ENTRY", Nanos::MIN, &["METHOD_EXIT"]);
        node.exit_stamp = Some(Nanos::MAX);
        let mut child = LogEvent::begin("METHOD_ENTRY", Nanos::MIN, &["METHOD_EXIT"]);
        child.exit_stamp = Some(Nanos::MAX);
        child.recalculate_durations();
        node.children.push(child.clone());
        node.children.push(child);
        node.recalculate_durations();

        assert_eq!(node.duration.total, Nanos::MAX);
        assert_eq!(node.duration.self_time, 0);
    }

    #[test]
    fn test_totals_saturate() {
        let mut totals = Totals {
            dml_rows: u64::MAX,
            row_count: u64::MAX,
            ..Totals::default()
        };
        totals.add(&Totals {
            dml_count: 1,
            dml_rows: 5,
            row_count: 5,
            ..Totals::default()
        });
        assert_eq!(totals.dml_rows, u64::MAX);
        assert_eq!(totals.row_count, u64::MAX);
        assert_eq!(totals.dml_count, 1);
    }
}
