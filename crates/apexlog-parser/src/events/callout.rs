use apexlog_types::LogEvent;

use crate::line::RawLine;

// CALLOUT_REQUEST|[55]|System.HttpRequest[Endpoint=https://api.example.com, Method=POST]
// CALLOUT_RESPONSE|[55]|System.HttpResponse[Status=OK, StatusCode=200]
pub fn callout(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.rest(3);
    let text = if text.is_empty() {
        event_type.to_string()
    } else {
        text
    };

    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .accepting_text()
}

// NAMED_CREDENTIAL_REQUEST|NamedCallout[Named Credential Id=0XA..., Endpoint=callout:Billing/v1]|...
// NAMED_CREDENTIAL_RESPONSE|NamedCallout[Named Credential Id=0XA..., Status Code=200]
//
// Only the bracketed callout summary is shown; trailing fields repeat it.
pub fn named_credential(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.non_empty(2).unwrap_or(event_type);
    LogEvent::basic(event_type, line.timestamp).with_text(text)
}
