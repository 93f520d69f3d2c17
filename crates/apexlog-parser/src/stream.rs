use apexlog_types::{LogEvent, Nanos, Severity};
use tracing::{debug, trace};

use crate::Result;
use crate::hooks;
use crate::line::{RawLine, is_type_tag, log_lines};
use crate::registry;
use crate::session::ParseSession;
use crate::settings::is_settings_line;

pub const SKIPPED_LINES: &str = "Skipped-Lines";
pub const MAX_SIZE_REACHED: &str = "Max-Size-reached";
pub const MAX_SIZE_DESCRIPTION: &str =
    "The maximum log size has been reached. Part of the log has been truncated.";

const SKIPPED_MARKER: &str = "*** Skipped";
const MAX_SIZE_MARKER: &str = "MAXIMUM DEBUG LOG SIZE REACHED";

/// Tag that some tools emit as filler; silently ignored.
const DUMMY_TYPE: &str = "DUMMY";

/// Tokenize `text` into a flat, time-ordered event stream.
///
/// Recoverable anomalies (unknown tags, stray lines, skip and size
/// markers) go to `session`; a malformed timestamp on an event line
/// fails the whole parse.
pub fn parse_events(text: &str, session: &mut ParseSession) -> Result<Vec<LogEvent>> {
    let mut events: Vec<LogEvent> = Vec::new();
    // Held back until the next event arrives so continuation text and
    // the after-hook can still modify it.
    let mut pending: Option<LogEvent> = None;

    for (line_number, line) in log_lines(text) {
        if line.is_empty() {
            continue;
        }

        let tag = line.split('|').nth(1).filter(|t| !t.is_empty());
        let accepts_text = pending.as_ref().is_some_and(|e| e.accepts_text);

        match tag {
            Some(tag) => {
                if let Some((event_type, constructor)) = registry::lookup(tag) {
                    let raw = RawLine::parse(line_number, line)?;
                    let event = constructor.build(event_type, &raw);
                    if let Some(mut previous) = pending.take() {
                        hooks::after(&mut previous, Some(&event), session);
                        events.push(previous);
                    }
                    pending = Some(event);
                } else if !is_type_tag(tag) && accepts_text {
                    append_continuation(&mut pending, line);
                } else if tag != DUMMY_TYPE {
                    trace!(line_number, tag, "unsupported event type");
                    session.parsing_error(format!("Unsupported log event name: {}", tag));
                }
            }
            None => {
                let last_timestamp = pending.as_ref().map_or(0, |e| e.timestamp);
                if line.starts_with(SKIPPED_MARKER) {
                    record_skipped_lines(session, last_timestamp, line);
                } else if line.contains(MAX_SIZE_MARKER) {
                    record_max_size(session, last_timestamp);
                } else if accepts_text {
                    append_continuation(&mut pending, line);
                } else if !is_settings_line(line) {
                    session.parsing_error(format!("Invalid log line: {}", line));
                }
            }
        }
    }

    if let Some(mut last) = pending.take() {
        hooks::after(&mut last, None, session);
        events.push(last);
    }

    debug!(
        events = events.len(),
        parsing_errors = session.parsing_errors().len(),
        "tokenized log"
    );
    Ok(events)
}

fn append_continuation(pending: &mut Option<LogEvent>, line: &str) {
    if let Some(event) = pending.as_mut() {
        event.append_text(line);
    }
}

fn record_skipped_lines(session: &mut ParseSession, timestamp: Nanos, line: &str) {
    session.record_issue(
        timestamp,
        SKIPPED_LINES,
        format!(
            "{}. A section of the log has been skipped and the log has been truncated. \
             Full details of this section of log can not be provided.",
            line
        ),
        Severity::Skip,
    );
}

fn record_max_size(session: &mut ParseSession, timestamp: Nanos) {
    session.record_issue(
        timestamp,
        MAX_SIZE_REACHED,
        MAX_SIZE_DESCRIPTION,
        Severity::Skip,
    );
    session.set_max_size_timestamp(timestamp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use apexlog_types::EventRole;

    fn parse(text: &str) -> (Vec<LogEvent>, ParseSession) {
        let mut session = ParseSession::new();
        let events = parse_events(text, &mut session).unwrap();
        (events, session)
    }

    #[test]
    fn test_events_in_order() {
        let (events, session) = parse(
            "10:00:00.0 (100)|METHOD_ENTRY|[1]|01p|Foo.bar()\n\
             10:00:00.0 (150)|METHOD_EXIT|[1]|01p|Foo|Foo.bar()\n",
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].role, EventRole::Begin);
        assert_eq!(events[1].role, EventRole::Exit);
        assert!(session.parsing_errors().is_empty());
    }

    #[test]
    fn test_continuation_text_is_appended() {
        let (events, _) = parse(
            "10:00:00.0 (1)|USER_DEBUG|[2]|DEBUG|first\n\
             second line\n\
             Third | with pipe\n\
             10:00:00.0 (2)|STATEMENT_EXECUTE|[3]\n",
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].text, "first\nsecond line\nThird | with pipe");
        assert!(events[0].raw_text.ends_with("second line\nThird | with pipe"));
    }

    #[test]
    fn test_unknown_tag_is_a_parsing_error() {
        let (events, session) = parse(
            "10:00:00.0 (1)|NOT_A_TAG|x\n\
             10:00:00.0 (2)|DUMMY|x\n\
             10:00:00.0 (3)|STATEMENT_EXECUTE|[3]\n",
        );
        assert_eq!(events.len(), 1);
        assert_eq!(
            session.parsing_errors(),
            &["Unsupported log event name: NOT_A_TAG".to_string()]
        );
    }

    #[test]
    fn test_stray_text_without_receiver() {
        let (_, session) = parse(
            "10:00:00.0 (1)|STATEMENT_EXECUTE|[3]\n\
             stray text\n",
        );
        assert_eq!(
            session.parsing_errors(),
            &["Invalid log line: stray text".to_string()]
        );
    }

    #[test]
    fn test_skip_and_size_markers() {
        let (_, session) = parse(
            "10:00:00.0 (5)|STATEMENT_EXECUTE|[3]\n\
             *** Skipped 2000 bytes of detailed log\n\
             10:00:00.0 (9)|STATEMENT_EXECUTE|[4]\n\
             *********** MAXIMUM DEBUG LOG SIZE REACHED ***********\n",
        );
        let summaries: Vec<_> = session.issues().iter().map(|i| i.summary.as_str()).collect();
        assert_eq!(summaries, vec![SKIPPED_LINES, MAX_SIZE_REACHED]);
        assert_eq!(session.issues()[0].start_time, 5);
        assert_eq!(session.max_size_timestamp(), Some(9));
    }

    #[test]
    fn test_size_marker_wins_over_continuation() {
        let (events, session) = parse(
            "10:00:00.0 (5)|USER_DEBUG|[3]|DEBUG|hi\n\
             *********** MAXIMUM DEBUG LOG SIZE REACHED ***********\n",
        );
        assert_eq!(events[0].text, "hi");
        assert!(session.has_issue(MAX_SIZE_REACHED));
    }

    #[test]
    fn test_malformed_timestamp_fails() {
        let mut session = ParseSession::new();
        let err = parse_events(
            "10:00:00.0 (1)|EXECUTION_STARTED\n10:00:00.0|METHOD_ENTRY|[1]|01p|Foo.bar()\n",
            &mut session,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp { line_number: 2, .. }));
    }

    #[test]
    fn test_preamble_is_ignored() {
        let (events, session) = parse(
            "64.0 APEX_CODE,FINE;APEX_PROFILING,INFO\n\
             Execute Anonymous: System.debug(1);\n\
             10:00:00.0 (1)|EXECUTION_STARTED\n\
             10:00:00.0 (2)|EXECUTION_FINISHED\n",
        );
        assert_eq!(events.len(), 2);
        assert!(session.parsing_errors().is_empty());
    }

    #[test]
    fn test_package_entry_gets_exit_stamp() {
        let (events, _) = parse(
            "10:00:00.0 (10)|ENTERING_MANAGED_PKG|ns\n\
             10:00:00.0 (40)|STATEMENT_EXECUTE|[1]\n",
        );
        assert_eq!(events[0].exit_stamp, Some(40));
    }
}
