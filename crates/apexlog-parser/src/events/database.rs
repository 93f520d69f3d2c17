use apexlog_types::{Category, EventPayload, LogEvent};

use crate::line::{RawLine, parse_rows, strip_label};

// DML_BEGIN|[12]|Op:Insert|Type:Account|Rows:1
pub fn dml_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let operation = strip_label(line.field(3), "Op:");
    let object = strip_label(line.field(4), "Type:");
    let rows = parse_rows(line.field(5));

    LogEvent::begin(event_type, line.timestamp, &["DML_END"])
        .with_line_number(line.line_ref(2))
        .with_text(format!("DML {} {}", operation, object))
        .with_category(Category::Dml)
        .with_payload(EventPayload::Dml {
            operation: operation.to_string(),
            object: object.to_string(),
            rows,
        })
}

// SOQL_EXECUTE_BEGIN|[5]|Aggregations:0|SELECT Id FROM Account
pub fn soql_execute_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let aggregations = strip_label(line.field(3), "Aggregations:")
        .parse()
        .unwrap_or(0);

    LogEvent::begin(event_type, line.timestamp, &["SOQL_EXECUTE_END"])
        .with_line_number(line.line_ref(2))
        .with_text(line.rest(4))
        .with_category(Category::Soql)
        .with_payload(EventPayload::Soql {
            aggregations,
            rows: 0,
        })
}

// SOSL_EXECUTE_BEGIN|[9]|FIND :term IN ALL FIELDS
pub fn sosl_execute_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::begin(event_type, line.timestamp, &["SOSL_EXECUTE_END"])
        .with_line_number(line.line_ref(2))
        .with_text(line.rest(3))
        .with_category(Category::Soql)
        .with_payload(EventPayload::Sosl { rows: 0 })
}

// SOQL_EXECUTE_END|[5]|Rows:3
// SOSL_EXECUTE_END|[9]|Rows:1
pub fn query_execute_end(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let rows = parse_rows(line.field(3));

    LogEvent::exit(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(line.field(3))
        .with_payload(EventPayload::QueryEnd { rows })
}

// SOQL_EXECUTE_EXPLAIN|[5]|Index on Account : [Name], cardinality: 1, sobjectCardinality: 20, relativeCost 0.2
pub fn soql_execute_explain(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(line.rest(3))
}
