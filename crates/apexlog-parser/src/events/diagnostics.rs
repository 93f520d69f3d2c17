use apexlog_types::{EventPayload, LogEvent};

use crate::line::RawLine;

// USER_DEBUG|[3]|DEBUG|value of x: 5
pub fn user_debug(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(line.rest(4))
        .with_payload(EventPayload::UserDebug {
            level: line.field(3).to_string(),
        })
        .accepting_text()
}

// EXCEPTION_THROWN|[7]|System.NullPointerException: Attempt to de-reference a null object
pub fn exception_thrown(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(line.rest(3))
        .with_payload(EventPayload::Exception)
        .accepting_text()
        .discontinuous()
}

// FATAL_ERROR|System.LimitException: Too many SOQL queries: 101
pub fn fatal_error(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_text(line.rest(2))
        .accepting_text()
        .discontinuous()
}

// LIMIT_USAGE_FOR_NS|(default)|
//   Number of SOQL queries: 1 out of 100
//   ...
pub fn limit_usage_for_ns(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_text(line.field(2))
        .with_payload(EventPayload::LimitUsage)
        .accepting_text()
}

// CUMULATIVE_LIMIT_USAGE
//   (LIMIT_USAGE_FOR_NS blocks follow)
// CUMULATIVE_LIMIT_USAGE_END
pub fn cumulative_limit_usage(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::begin(event_type, line.timestamp, &["CUMULATIVE_LIMIT_USAGE_END"])
        .with_text(event_type)
}
