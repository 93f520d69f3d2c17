use apexlog_types::LogEvent;

use crate::line::RawLine;

// SYSTEM_MODE_ENTER|false
// SYSTEM_MODE_EXIT|false
//
// Leaves: the pair brackets privileged execution but never nests calls.
pub fn system_mode(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = match line.non_empty(2) {
        Some(mode) => format!("{} : {}", event_type, mode),
        None => event_type.to_string(),
    };
    LogEvent::basic(event_type, line.timestamp).with_text(text)
}

// STATEMENT_EXECUTE|[5]
pub fn statement_execute(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(event_type)
}

// VARIABLE_ASSIGNMENT|[3]|x|"multi
// VARIABLE_ASSIGNMENT|[3]|this.name|"Acme"|0x1f2e3d
//
// String values can run onto the following lines.
pub fn variable_assignment(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let name = line.field(3);
    let value = line.field(4);
    let text = match (name.is_empty(), value.is_empty()) {
        (true, _) => event_type.to_string(),
        (false, true) => name.to_string(),
        (false, false) => format!("{} = {}", name, value),
    };

    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .accepting_text()
}

// HEAP_ALLOCATE|[72]|Bytes:3
// HEAP_ALLOCATE|[EXTERNAL]|Bytes:8
pub fn heap_allocate(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.non_empty(3).unwrap_or(event_type);

    LogEvent::basic(event_type, line.timestamp)
        .with_line_number(line.line_ref(2))
        .with_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apexlog_types::{EventRole, LineNumber};

    fn raw(text: &str) -> RawLine<'_> {
        RawLine::parse(1, text).unwrap()
    }

    #[test]
    fn test_system_mode_text() {
        let event = system_mode("SYSTEM_MODE_ENTER", &raw("x (1)|SYSTEM_MODE_ENTER|false"));
        assert_eq!(event.text, "SYSTEM_MODE_ENTER : false");
        assert_eq!(event.role, EventRole::Basic);

        let bare = system_mode("SYSTEM_MODE_EXIT", &raw("x (1)|SYSTEM_MODE_EXIT"));
        assert_eq!(bare.text, "SYSTEM_MODE_EXIT");
    }

    #[test]
    fn test_statement_keeps_line() {
        let event = statement_execute("STATEMENT_EXECUTE", &raw("x (1)|STATEMENT_EXECUTE|[5]"));
        assert_eq!(event.line_number, Some(LineNumber::Line(5)));
        assert_eq!(event.text, "STATEMENT_EXECUTE");
    }

    #[test]
    fn test_variable_assignment_text() {
        let event = variable_assignment(
            "VARIABLE_ASSIGNMENT",
            &raw("x (1)|VARIABLE_ASSIGNMENT|[3]|this.name|\"Acme\"|0x1f2e3d"),
        );
        assert_eq!(event.text, "this.name = \"Acme\"");
        assert!(event.accepts_text);

        let unnamed = variable_assignment(
            "VARIABLE_ASSIGNMENT",
            &raw("x (1)|VARIABLE_ASSIGNMENT|[EXTERNAL]"),
        );
        assert_eq!(unnamed.text, "VARIABLE_ASSIGNMENT");
        assert_eq!(unnamed.line_number, Some(LineNumber::External));
    }

    #[test]
    fn test_heap_allocate() {
        let event = heap_allocate("HEAP_ALLOCATE", &raw("x (1)|HEAP_ALLOCATE|[72]|Bytes:3"));
        assert_eq!(event.text, "Bytes:3");
        assert_eq!(event.line_number, Some(LineNumber::Line(72)));
    }
}
