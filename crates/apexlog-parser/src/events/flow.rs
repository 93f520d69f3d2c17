use apexlog_types::{Category, LogEvent};

use crate::line::RawLine;

const ELEMENT_EXITS: &[&str] = &["FLOW_ELEMENT_END"];
const BULK_ELEMENT_EXITS: &[&str] = &["FLOW_BULK_ELEMENT_END"];

// FLOW_START_INTERVIEWS_BEGIN|1
pub fn flow_start_interviews_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = match line.non_empty(2) {
        Some(count) => format!("FLOW_START_INTERVIEWS : {}", count),
        None => "FLOW_START_INTERVIEWS".to_string(),
    };

    LogEvent::begin(event_type, line.timestamp, &["FLOW_START_INTERVIEWS_END"])
        .with_text(text)
        .with_category(Category::Flow)
}

// FLOW_START_INTERVIEW_BEGIN|3f0b...|Update Account Rating
pub fn flow_start_interview_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.non_empty(3).unwrap_or(event_type);

    LogEvent::begin(event_type, line.timestamp, &["FLOW_START_INTERVIEW_END"])
        .with_text(text)
        .with_category(Category::Flow)
}

// FLOW_ELEMENT_BEGIN|3f0b...|FlowDecision|Check_Rating
// FLOW_BULK_ELEMENT_BEGIN|FlowRecordUpdate|Update_Records
pub fn flow_element_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let exit_types = if event_type == "FLOW_BULK_ELEMENT_BEGIN" {
        BULK_ELEMENT_EXITS
    } else {
        ELEMENT_EXITS
    };
    let fields: Vec<&str> = line.parts[2..]
        .iter()
        .copied()
        .filter(|f| !f.is_empty())
        .collect();
    // interview id is noise; keep element type and name
    let text = match fields.as_slice() {
        [] => event_type.to_string(),
        [only] => only.to_string(),
        [.., kind, name] => format!("{} {}", kind, name),
    };

    LogEvent::begin(event_type, line.timestamp, exit_types)
        .with_text(text)
        .with_category(Category::Flow)
}

// WF_CRITERIA_BEGIN|[Account: Acme 001xx]|Set Rating|01Q...|ON_ALL_CHANGES|0
pub fn wf_criteria_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.non_empty(3).unwrap_or(event_type);

    LogEvent::begin(event_type, line.timestamp, &["WF_CRITERIA_END"])
        .with_text(format!("WF_CRITERIA : {}", text))
        .with_category(Category::Workflow)
}

// WF_RULE_EVAL_BEGIN|Workflow
// WF_RULE_EVAL_BEGIN|Assignment
pub fn wf_rule_eval_begin(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line.non_empty(2).unwrap_or(event_type);

    LogEvent::begin(event_type, line.timestamp, &["WF_RULE_EVAL_END"])
        .with_text(text)
        .with_category(Category::Workflow)
}

// VALIDATION_RULE|03dxx0000001abc|Require_Account_Name
pub fn validation_rule(event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
    let text = line
        .non_empty(3)
        .or_else(|| line.non_empty(2))
        .unwrap_or(event_type);

    LogEvent::basic(event_type, line.timestamp)
        .with_text(text)
        .with_category(Category::Workflow)
}
