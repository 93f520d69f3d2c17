use apexlog_types::{Category, LineNumber, LogEvent};

use crate::line::RawLine;

/// Line reference (when the first data field is one) and the display
/// text made of the remaining fields. Falls back to the tag when the
/// line has no data fields.
fn line_and_text(event_type: &'static str, line: &RawLine<'_>) -> (Option<LineNumber>, String) {
    let line_number = line.line_ref(2);
    let text = match line_number {
        Some(_) => line.rest(3),
        None => line.rest(2),
    };
    if text.is_empty() {
        (line_number, event_type.to_string())
    } else {
        (line_number, text)
    }
}

pub fn basic(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let (line_number, text) = line_and_text(event_type, line);
    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line_number)
        .with_text(text)
}

pub fn exit(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let (line_number, text) = line_and_text(event_type, line);
    LogEvent::exit(event_type, line.timestamp)
        .with_line_number(line_number)
        .with_text(text)
}

pub fn begin(
    event_type: &'static str,
    line: &RawLine<'_>,
    exit_types: &'static [&'static str],
    category: Category,
) -> LogEvent {
    let (line_number, text) = line_and_text(event_type, line);
    LogEvent::begin(event_type, line.timestamp, exit_types)
        .with_line_number(line_number)
        .with_text(text)
        .with_category(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_falls_back_to_tag() {
        let line = RawLine::parse(1, "10:00:00.0 (1)|EXECUTION_STARTED").unwrap();
        let event = begin("EXECUTION_STARTED", &line, &["EXECUTION_FINISHED"], Category::None);
        assert_eq!(event.text, "EXECUTION_STARTED");
        assert!(event.line_number.is_none());
    }

    #[test]
    fn test_line_reference_is_not_text() {
        let line = RawLine::parse(1, "10:00:00.0 (1)|HEAP_ALLOCATE|[72]|Bytes:3").unwrap();
        let event = basic("HEAP_ALLOCATE", &line);
        assert_eq!(event.line_number, Some(LineNumber::Line(72)));
        assert_eq!(event.text, "Bytes:3");
    }
}
