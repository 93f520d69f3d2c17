use apexlog_types::{Category, LogEvent};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::events;
use crate::line::RawLine;

/// How an event is built from its line.
///
/// Bespoke constructors handle the tags whose fields feed the tree or
/// the rollups; every other known tag is described by capability alone.
#[derive(Clone, Copy)]
pub enum Constructor {
    /// Tag-specific field extraction
    Bespoke(fn(&'static str, &RawLine<'_>) -> LogEvent),
    /// Begin event closed by any of `exit_types`
    Begin {
        exit_types: &'static [&'static str],
        category: Category,
    },
    /// Closes an enclosing begin event
    Exit,
    /// Leaf event
    Basic { accepts_text: bool },
}

impl Constructor {
    pub fn build(&self, event_type: &'static str, line: &RawLine<'_>) -> LogEvent {
        let event = match *self {
            Constructor::Bespoke(build) => build(event_type, line),
            Constructor::Begin {
                exit_types,
                category,
            } => events::generic::begin(event_type, line, exit_types, category),
            Constructor::Exit => events::generic::exit(event_type, line),
            Constructor::Basic { accepts_text } => {
                let event = events::generic::basic(event_type, line);
                if accepts_text {
                    event.accepting_text()
                } else {
                    event
                }
            }
        };
        LogEvent {
            raw_text: line.text.to_string(),
            ..event
        }
    }
}

const fn begin(exit_types: &'static [&'static str], category: Category) -> Constructor {
    Constructor::Begin {
        exit_types,
        category,
    }
}

const BASIC: Constructor = Constructor::Basic {
    accepts_text: false,
};

const TEXT: Constructor = Constructor::Basic { accepts_text: true };

const EXIT: Constructor = Constructor::Exit;

/// Every known tag and its constructor.
const EVENT_TYPES: &[(&str, Constructor)] = &[
    // Code units and Apex execution
    ("EXECUTION_STARTED", begin(&["EXECUTION_FINISHED"], Category::None)),
    ("EXECUTION_FINISHED", EXIT),
    ("CODE_UNIT_STARTED", Constructor::Bespoke(events::code::code_unit_started)),
    ("CODE_UNIT_FINISHED", EXIT),
    ("METHOD_ENTRY", Constructor::Bespoke(events::code::method_entry)),
    ("METHOD_EXIT", EXIT),
    ("CONSTRUCTOR_ENTRY", Constructor::Bespoke(events::code::constructor_entry)),
    ("CONSTRUCTOR_EXIT", EXIT),
    ("SYSTEM_METHOD_ENTRY", Constructor::Bespoke(events::code::system_method_entry)),
    ("SYSTEM_METHOD_EXIT", EXIT),
    ("SYSTEM_CONSTRUCTOR_ENTRY", Constructor::Bespoke(events::code::system_constructor_entry)),
    ("SYSTEM_CONSTRUCTOR_EXIT", EXIT),
    ("SYSTEM_MODE_ENTER", Constructor::Bespoke(events::system::system_mode)),
    ("SYSTEM_MODE_EXIT", Constructor::Bespoke(events::system::system_mode)),
    ("ENTERING_MANAGED_PKG", Constructor::Bespoke(events::code::entering_managed_pkg)),
    ("VF_APEX_CALL_START", Constructor::Bespoke(events::code::vf_apex_call_start)),
    ("VF_APEX_CALL_END", EXIT),
    ("VF_DESERIALIZE_VIEWSTATE_BEGIN", begin(&["VF_DESERIALIZE_VIEWSTATE_END"], Category::SystemMethod)),
    ("VF_DESERIALIZE_VIEWSTATE_END", EXIT),
    ("VF_SERIALIZE_VIEWSTATE_BEGIN", begin(&["VF_SERIALIZE_VIEWSTATE_END"], Category::SystemMethod)),
    ("VF_SERIALIZE_VIEWSTATE_END", EXIT),
    ("VF_EVALUATE_FORMULA_BEGIN", begin(&["VF_EVALUATE_FORMULA_END"], Category::SystemMethod)),
    ("VF_EVALUATE_FORMULA_END", EXIT),
    ("VF_PAGE_MESSAGE", TEXT),
    ("STATEMENT_EXECUTE", Constructor::Bespoke(events::system::statement_execute)),
    ("VARIABLE_SCOPE_BEGIN", BASIC),
    ("VARIABLE_SCOPE_END", BASIC),
    ("VARIABLE_ASSIGNMENT", Constructor::Bespoke(events::system::variable_assignment)),
    ("HEAP_ALLOCATE", Constructor::Bespoke(events::system::heap_allocate)),
    ("HEAP_DEALLOCATE", BASIC),
    ("BULK_HEAP_ALLOCATE", BASIC),
    ("STATIC_VARIABLE_LIST", TEXT),
    ("STACK_FRAME_VARIABLE_LIST", TEXT),
    ("TOTAL_EMAIL_RECIPIENTS_QUEUED", BASIC),
    ("EMAIL_QUEUE", BASIC),
    ("POP_TRACE_FLAGS", BASIC),
    ("PUSH_TRACE_FLAGS", BASIC),
    ("USER_INFO", BASIC),
    ("USER_DEBUG", Constructor::Bespoke(events::diagnostics::user_debug)),
    ("EXCEPTION_THROWN", Constructor::Bespoke(events::diagnostics::exception_thrown)),
    ("FATAL_ERROR", Constructor::Bespoke(events::diagnostics::fatal_error)),
    // Database
    ("DML_BEGIN", Constructor::Bespoke(events::database::dml_begin)),
    ("DML_END", EXIT),
    ("SOQL_EXECUTE_BEGIN", Constructor::Bespoke(events::database::soql_execute_begin)),
    ("SOQL_EXECUTE_END", Constructor::Bespoke(events::database::query_execute_end)),
    ("SOQL_EXECUTE_EXPLAIN", Constructor::Bespoke(events::database::soql_execute_explain)),
    ("SOSL_EXECUTE_BEGIN", Constructor::Bespoke(events::database::sosl_execute_begin)),
    ("SOSL_EXECUTE_END", Constructor::Bespoke(events::database::query_execute_end)),
    ("QUERY_MORE_BEGIN", begin(&["QUERY_MORE_END"], Category::Soql)),
    ("QUERY_MORE_END", EXIT),
    ("QUERY_MORE_ITERATIONS", BASIC),
    ("IDEAS_QUERY_EXECUTE", BASIC),
    ("SAVEPOINT_ROLLBACK", BASIC),
    ("SAVEPOINT_SET", BASIC),
    // Limits and profiling
    ("LIMIT_USAGE", BASIC),
    ("LIMIT_USAGE_FOR_NS", Constructor::Bespoke(events::diagnostics::limit_usage_for_ns)),
    ("CUMULATIVE_LIMIT_USAGE", Constructor::Bespoke(events::diagnostics::cumulative_limit_usage)),
    ("CUMULATIVE_LIMIT_USAGE_END", EXIT),
    ("CUMULATIVE_PROFILING", TEXT),
    ("CUMULATIVE_PROFILING_BEGIN", begin(&["CUMULATIVE_PROFILING_END"], Category::None)),
    ("CUMULATIVE_PROFILING_END", EXIT),
    ("TESTING_LIMITS", BASIC),
    // Callouts
    ("CALLOUT_REQUEST", Constructor::Bespoke(events::callout::callout)),
    ("CALLOUT_RESPONSE", Constructor::Bespoke(events::callout::callout)),
    ("NAMED_CREDENTIAL_REQUEST", Constructor::Bespoke(events::callout::named_credential)),
    ("NAMED_CREDENTIAL_RESPONSE", Constructor::Bespoke(events::callout::named_credential)),
    ("NAMED_CREDENTIAL_RESPONSE_DETAIL", BASIC),
    // Platform events
    ("EVENT_SERVICE_PUB_BEGIN", begin(&["EVENT_SERVICE_PUB_END"], Category::Flow)),
    ("EVENT_SERVICE_PUB_END", EXIT),
    ("EVENT_SERVICE_PUB_DETAIL", BASIC),
    ("EVENT_SERVICE_SUB_BEGIN", begin(&["EVENT_SERVICE_SUB_END"], Category::Flow)),
    ("EVENT_SERVICE_SUB_END", EXIT),
    ("EVENT_SERVICE_SUB_DETAIL", BASIC),
    // Flows
    ("FLOW_START_INTERVIEWS_BEGIN", Constructor::Bespoke(events::flow::flow_start_interviews_begin)),
    ("FLOW_START_INTERVIEWS_END", EXIT),
    ("FLOW_START_INTERVIEWS_ERROR", TEXT),
    ("FLOW_START_INTERVIEW_BEGIN", Constructor::Bespoke(events::flow::flow_start_interview_begin)),
    ("FLOW_START_INTERVIEW_END", EXIT),
    ("FLOW_START_INTERVIEW_LIMIT_USAGE", BASIC),
    ("FLOW_START_SCHEDULED_RECORDS", BASIC),
    ("FLOW_CREATE_INTERVIEW_BEGIN", begin(&["FLOW_CREATE_INTERVIEW_END"], Category::Flow)),
    ("FLOW_CREATE_INTERVIEW_END", EXIT),
    ("FLOW_CREATE_INTERVIEW_ERROR", TEXT),
    ("FLOW_ELEMENT_BEGIN", Constructor::Bespoke(events::flow::flow_element_begin)),
    ("FLOW_ELEMENT_END", EXIT),
    ("FLOW_ELEMENT_DEFERRED", BASIC),
    ("FLOW_ELEMENT_ERROR", TEXT),
    ("FLOW_ELEMENT_FAULT", TEXT),
    ("FLOW_ELEMENT_LIMIT_USAGE", BASIC),
    ("FLOW_BULK_ELEMENT_BEGIN", Constructor::Bespoke(events::flow::flow_element_begin)),
    ("FLOW_BULK_ELEMENT_END", EXIT),
    ("FLOW_BULK_ELEMENT_DETAIL", BASIC),
    ("FLOW_BULK_ELEMENT_LIMIT_USAGE", BASIC),
    ("FLOW_BULK_ELEMENT_NOT_SUPPORTED", BASIC),
    ("FLOW_INTERVIEW_FINISHED", BASIC),
    ("FLOW_INTERVIEW_FINISHED_LIMIT_USAGE", BASIC),
    ("FLOW_INTERVIEW_PAUSED", BASIC),
    ("FLOW_INTERVIEW_RESUMED", BASIC),
    ("FLOW_ACTIONCALL_DETAIL", BASIC),
    ("FLOW_ASSIGNMENT_DETAIL", BASIC),
    ("FLOW_LOOP_DETAIL", BASIC),
    ("FLOW_RULE_DETAIL", BASIC),
    ("FLOW_SUBFLOW_DETAIL", BASIC),
    ("FLOW_VALUE_ASSIGNMENT", TEXT),
    ("FLOW_WAIT_EVENT_RESUMING_DETAIL", BASIC),
    ("FLOW_WAIT_EVENT_WAITING_DETAIL", BASIC),
    ("FLOW_WAIT_RESUMING_DETAIL", BASIC),
    ("FLOW_WAIT_WAITING_DETAIL", BASIC),
    // Workflow and validation
    ("WF_RULE_EVAL_BEGIN", Constructor::Bespoke(events::flow::wf_rule_eval_begin)),
    ("WF_RULE_EVAL_END", EXIT),
    ("WF_RULE_EVAL_VALUE", BASIC),
    ("WF_RULE_FILTER", BASIC),
    ("WF_RULE_NOT_EVALUATED", BASIC),
    ("WF_CRITERIA_BEGIN", Constructor::Bespoke(events::flow::wf_criteria_begin)),
    ("WF_CRITERIA_END", EXIT),
    ("WF_FLOW_ACTION_BEGIN", begin(&["WF_FLOW_ACTION_END"], Category::Workflow)),
    ("WF_FLOW_ACTION_END", EXIT),
    ("WF_FLOW_ACTION_DETAIL", BASIC),
    ("WF_FLOW_ACTION_ERROR", TEXT),
    ("WF_FLOW_ACTION_ERROR_DETAIL", TEXT),
    ("WF_FORMULA", BASIC),
    ("WF_ACTION", BASIC),
    ("WF_ACTIONS_END", BASIC),
    ("WF_ACTION_TASK", BASIC),
    ("WF_APPROVAL", BASIC),
    ("WF_APPROVAL_REMOVE", BASIC),
    ("WF_APPROVAL_SUBMIT", BASIC),
    ("WF_APPROVAL_SUBMITTER", BASIC),
    ("WF_ASSIGN", BASIC),
    ("WF_EMAIL_ALERT", BASIC),
    ("WF_EMAIL_SENT", BASIC),
    ("WF_ENQUEUE_ACTIONS", BASIC),
    ("WF_ESCALATION_ACTION", BASIC),
    ("WF_EVAL_ENTRY_CRITERIA", BASIC),
    ("WF_FIELD_UPDATE", BASIC),
    ("WF_HARD_REJECT", BASIC),
    ("WF_NEXT_APPROVER", BASIC),
    ("WF_NO_PROCESS_FOUND", BASIC),
    ("WF_OUTBOUND_MSG", BASIC),
    ("WF_PROCESS_FOUND", BASIC),
    ("WF_PROCESS_NODE", BASIC),
    ("WF_REASSIGN_RECORD", BASIC),
    ("WF_RESPONSE_NOTIFY", BASIC),
    ("WF_RULE_ENTRY_ORDER", BASIC),
    ("WF_RULE_INVOCATION", BASIC),
    ("WF_SOFT_REJECT", BASIC),
    ("WF_SPOOL_ACTION_BEGIN", BASIC),
    ("WF_TIME_TRIGGER", BASIC),
    ("WF_TIME_TRIGGERS_BEGIN", BASIC),
    ("VALIDATION_RULE", Constructor::Bespoke(events::flow::validation_rule)),
    ("VALIDATION_FORMULA", TEXT),
    ("VALIDATION_PASS", BASIC),
    ("VALIDATION_FAIL", BASIC),
    ("VALIDATION_ERROR", TEXT),
    // Duplicate detection and matching
    ("DUPLICATE_DETECTION_BEGIN", begin(&["DUPLICATE_DETECTION_END"], Category::Workflow)),
    ("DUPLICATE_DETECTION_END", EXIT),
    ("DUPLICATE_DETECTION_RULE_INVOCATION", BASIC),
    ("DUPLICATE_DETECTION_MATCH_INVOCATION_DETAILS", BASIC),
    ("DUPLICATE_DETECTION_MATCH_INVOCATION_SUMMARY", BASIC),
    ("DUPLICATE_RULE_FILTER", BASIC),
    ("DUPLICATE_RULE_FILTER_RESULT", BASIC),
    ("DUPLICATE_RULE_FILTER_VALUE", BASIC),
    ("MATCH_ENGINE_BEGIN", begin(&["MATCH_ENGINE_END"], Category::Method)),
    ("MATCH_ENGINE_END", EXIT),
    // Platform cache
    ("ORG_CACHE_PUT_BEGIN", begin(&["ORG_CACHE_PUT_END"], Category::Method)),
    ("ORG_CACHE_PUT_END", EXIT),
    ("ORG_CACHE_GET_BEGIN", begin(&["ORG_CACHE_GET_END"], Category::Method)),
    ("ORG_CACHE_GET_END", EXIT),
    ("ORG_CACHE_REMOVE_BEGIN", begin(&["ORG_CACHE_REMOVE_END"], Category::Method)),
    ("ORG_CACHE_REMOVE_END", EXIT),
    ("ORG_CACHE_MEMORY_USAGE", BASIC),
    ("SESSION_CACHE_PUT_BEGIN", begin(&["SESSION_CACHE_PUT_END"], Category::Method)),
    ("SESSION_CACHE_PUT_END", EXIT),
    ("SESSION_CACHE_GET_BEGIN", begin(&["SESSION_CACHE_GET_END"], Category::Method)),
    ("SESSION_CACHE_GET_END", EXIT),
    ("SESSION_CACHE_REMOVE_BEGIN", begin(&["SESSION_CACHE_REMOVE_END"], Category::Method)),
    ("SESSION_CACHE_REMOVE_END", EXIT),
    ("SESSION_CACHE_MEMORY_USAGE", BASIC),
    // Next best action
    ("NBA_NODE_BEGIN", begin(&["NBA_NODE_END"], Category::Method)),
    ("NBA_NODE_END", EXIT),
    ("NBA_NODE_DETAIL", BASIC),
    ("NBA_NODE_ERROR", TEXT),
    ("NBA_OFFER_INVALID", BASIC),
    ("NBA_STRATEGY_BEGIN", begin(&["NBA_STRATEGY_END"], Category::Method)),
    ("NBA_STRATEGY_END", EXIT),
    ("NBA_STRATEGY_ERROR", TEXT),
    // Push notifications, SLA and misc
    ("PUSH_NOTIFICATION_INVALID_APP", BASIC),
    ("PUSH_NOTIFICATION_INVALID_CERTIFICATE", BASIC),
    ("PUSH_NOTIFICATION_INVALID_NOTIFICATION", BASIC),
    ("PUSH_NOTIFICATION_NO_DEVICES", BASIC),
    ("PUSH_NOTIFICATION_NOT_ENABLED", BASIC),
    ("PUSH_NOTIFICATION_SENT", BASIC),
    ("SLA_END", BASIC),
    ("SLA_EVAL_MILESTONE", BASIC),
    ("SLA_NULL_START_DATE", BASIC),
    ("SLA_PROCESS_CASE", BASIC),
    ("TEMPLATE_PROCESSING_ERROR", TEXT),
    ("TEMPLATED_ASSET", BASIC),
    ("TRANSFORMATION_SUMMARY", BASIC),
    ("XDS_DETAIL", BASIC),
    ("XDS_RESPONSE", BASIC),
    ("XDS_RESPONSE_DETAIL", BASIC),
    ("XDS_RESPONSE_ERROR", TEXT),
];

static REGISTRY: LazyLock<HashMap<&'static str, Constructor>> =
    LazyLock::new(|| EVENT_TYPES.iter().copied().collect());

/// Constructor for `event_type`, with the registry's static copy of the
/// tag so events can hold it without allocating.
pub fn lookup(event_type: &str) -> Option<(&'static str, Constructor)> {
    REGISTRY
        .get_key_value(event_type)
        .map(|(tag, ctor)| (*tag, *ctor))
}

pub fn is_known_type(event_type: &str) -> bool {
    REGISTRY.contains_key(event_type)
}
