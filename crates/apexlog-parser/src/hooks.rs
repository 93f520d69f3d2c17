use apexlog_types::{EventPayload, LogEvent, Severity};

use crate::limits;
use crate::session::ParseSession;

/// Runs once an event is complete: its continuation text has been
/// collected and the following event (if any) is known.
pub(crate) fn after(event: &mut LogEvent, next: Option<&LogEvent>, session: &mut ParseSession) {
    match event.event_type {
        "ENTERING_MANAGED_PKG" => {
            if let Some(next) = next {
                event.exit_stamp = Some(next.timestamp);
            }
        }
        "EXCEPTION_THROWN" => {
            if event.text.contains("System.LimitException") {
                let summary = first_line(&event.text).to_string();
                session.record_issue(event.timestamp, summary, event.text.clone(), Severity::Error);
            }
        }
        "FATAL_ERROR" => {
            let summary = first_line(&event.text);
            let detail = if summary.len() == event.text.len() {
                String::new()
            } else {
                event.text.clone()
            };
            session.record_issue(
                event.timestamp,
                format!("FATAL ERROR! cause={}", summary),
                detail,
                Severity::Error,
            );
        }
        _ => {}
    }

    if matches!(event.payload, EventPayload::LimitUsage) {
        let namespace = first_line(&event.text).to_string();
        session.record_limits(namespace, limits::parse_limit_usage(&event.text));
        if let Some(cpu_time) = limits::cpu_time(&event.text) {
            session.observe_cpu_time(cpu_time);
        }
    }
}

fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or(text)
}
