use apexlog_types::{Category, LogEvent};

use crate::line::RawLine;

const VF_APEX_CALL_EXITS: &[&str] = &["VF_APEX_CALL_END"];
const NO_EXITS: &[&str] = &[];

// CODE_UNIT_STARTED|[EXTERNAL]|01q...|AccountTrigger on Account trigger event BeforeInsert|__sfdc_trigger/AccountTrigger
// CODE_UNIT_STARTED|[EXTERNAL]|execute_anonymous_apex
pub fn code_unit_started(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let kind = line.field(3);
    let category = if kind.starts_with("Workflow:") || kind.starts_with("Flow:") {
        Category::Workflow
    } else {
        Category::CodeUnit
    };
    let text = line.non_empty(4).unwrap_or(kind);

    LogEvent::begin(event_type, line.timestamp, &["CODE_UNIT_FINISHED"])
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .with_category(category)
}

// METHOD_ENTRY|[7]|01p...|Foo.bar()
pub fn method_entry(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line
        .non_empty(4)
        .or_else(|| line.non_empty(3))
        .unwrap_or(event_type);

    LogEvent::begin(event_type, line.timestamp, &["METHOD_EXIT"])
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .with_category(Category::Method)
}

// CONSTRUCTOR_ENTRY|[3]|01p...|<init>(String)|Foo  ->  Foo(String)
pub fn constructor_entry(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let args = line.field(4);
    let text = match line.non_empty(5) {
        Some(class_name) => {
            let params = args.find('(').map_or("", |idx| &args[idx..]);
            format!("{}{}", class_name, params)
        }
        None => args.to_string(),
    };

    LogEvent::begin(event_type, line.timestamp, &["CONSTRUCTOR_EXIT"])
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .with_category(Category::Method)
}

// SYSTEM_METHOD_ENTRY|[12]|System.debug(ANY)
pub fn system_method_entry(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::begin(event_type, line.timestamp, &["SYSTEM_METHOD_EXIT"])
        .with_line_number(line.line_ref(2))
        .with_text(line.field(3))
        .with_category(Category::SystemMethod)
}

// SYSTEM_CONSTRUCTOR_ENTRY|[4]|<init>()
pub fn system_constructor_entry(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    LogEvent::begin(event_type, line.timestamp, &["SYSTEM_CONSTRUCTOR_EXIT"])
        .with_line_number(line.line_ref(2))
        .with_text(line.field(3))
        .with_category(Category::SystemMethod)
}

/// ENTERING_MANAGED_PKG|ns
///
/// Timed, but never closed by an exit line: its end is the timestamp of
/// whatever event follows it.
pub fn entering_managed_pkg(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let raw_ns = line.field(2);
    let namespace = raw_ns.rsplit('.').next().unwrap_or(raw_ns);

    LogEvent::begin(event_type, line.timestamp, &[])
        .with_text(namespace)
        .with_namespace(namespace)
        .with_category(Category::Method)
}

// VF_APEX_CALL_START|[EXTERNAL]|01p...|FooController invoke(save)
// VF_APEX_CALL_START|[EXTERNAL]|FooController.System.PageReference
//
// Page reference calls are never followed by VF_APEX_CALL_END.
pub fn vf_apex_call_start(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let class_text = line
        .non_empty(5)
        .or_else(|| line.non_empty(3))
        .unwrap_or(event_type);
    let method_text = line.non_empty(4);

    let (exit_types, text) = match method_text {
        Some(method) => (VF_APEX_CALL_EXITS, method),
        None if class_text.to_ascii_lowercase().contains("pagereference") => (NO_EXITS, class_text),
        None => (VF_APEX_CALL_EXITS, class_text),
    };

    LogEvent::begin(event_type, line.timestamp, exit_types)
        .with_line_number(line.line_ref(2))
        .with_text(text)
        .with_category(Category::Method)
}
