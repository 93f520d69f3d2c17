use apexlog_engine::{
    Error, MAX_SIZE_REACHED, ParseOptions, SKIPPED_LINES, Severity, UNEXPECTED_END, parse_log,
    parse_log_with,
};
use apexlog_testing::LogBuilder;

#[test]
fn test_max_size_issue_moves_to_truncation_point() {
    let text = LogBuilder::new()
        .execution_started(0)
        .method_entry(10, 1, "Foo.bar()")
        .statement(20, 2)
        .max_size_reached()
        .statement(30, 3)
        .build();

    let log = parse_log(&text).unwrap();

    let summaries: Vec<_> = log.issues.iter().map(|i| i.summary.as_str()).collect();
    assert_eq!(summaries, vec![UNEXPECTED_END, MAX_SIZE_REACHED]);

    let max_size = &log.issues[1];
    assert_eq!(max_size.start_time, 30);
    assert_eq!(max_size.severity, Severity::Skip);
    assert!(log.root.children[0].is_truncated);
}

#[test]
fn test_size_marker_after_debug_text() {
    let text = LogBuilder::new()
        .execution_started(0)
        .user_debug(5, 1, "hello")
        .max_size_reached()
        .build();

    let log = parse_log(&text).unwrap();

    let debug = &log.root.children[0].children[0];
    assert_eq!(debug.text, "hello");
    assert!(log.has_issue(MAX_SIZE_REACHED));
}

#[test]
fn test_skipped_lines() {
    let text = LogBuilder::new()
        .execution_started(0)
        .statement(5, 1)
        .raw("*** Skipped 22038 bytes of detailed log")
        .statement(9, 2)
        .execution_finished(10)
        .build();

    let log = parse_log(&text).unwrap();

    assert_eq!(log.issues.len(), 1);
    let issue = &log.issues[0];
    assert_eq!(issue.summary, SKIPPED_LINES);
    assert_eq!(issue.start_time, 5);
    assert_eq!(issue.severity, Severity::Skip);
    assert!(issue.description.starts_with("*** Skipped 22038 bytes"));
}

#[test]
fn test_fatal_error_issue() {
    let text = LogBuilder::new()
        .execution_started(0)
        .fatal_error(40, "System.LimitException: Too many SOQL queries: 101")
        .raw("")
        .raw("Class.Foo.bar: line 3, column 1")
        .execution_finished(50)
        .build();

    let log = parse_log(&text).unwrap();

    let issue = &log.issues[0];
    assert_eq!(
        issue.summary,
        "FATAL ERROR! cause=System.LimitException: Too many SOQL queries: 101"
    );
    assert_eq!(issue.severity, Severity::Error);
    assert!(issue.description.contains("Class.Foo.bar: line 3"));
}

#[test]
fn test_limit_usage_block() {
    let text = LogBuilder::new()
        .execution_started(0)
        .event(90, "LIMIT_USAGE_FOR_NS", &["(default)"])
        .raw("  Number of SOQL queries: 1 out of 100")
        .raw("  Number of DML statements: 2 out of 150")
        .raw("  Maximum CPU time: 15 out of 10000")
        .execution_finished(100)
        .build();

    let log = parse_log(&text).unwrap();

    assert_eq!(log.cpu_time, 15_000_000);
    let limits = &log.governor_limits["(default)"];
    assert_eq!(limits.soql_queries.used, 1);
    assert_eq!(limits.soql_queries.max, 100);
    assert_eq!(limits.dml_statements.used, 2);
    assert!(log.parsing_errors.is_empty());
}

#[test]
fn test_parsing_errors() {
    let text = LogBuilder::new()
        .execution_started(0)
        .event(5, "NOT_A_REAL_EVENT", &["x"])
        .statement(6, 1)
        .raw("garbage line")
        .execution_finished(10)
        .build();

    let log = parse_log(&text).unwrap();
    assert_eq!(
        log.parsing_errors,
        vec![
            "Unsupported log event name: NOT_A_REAL_EVENT".to_string(),
            "Invalid log line: garbage line".to_string(),
        ]
    );
    assert!(log.issues.is_empty());

    let quiet = ParseOptions {
        collect_parsing_errors: false,
        ..ParseOptions::default()
    };
    let log = parse_log_with(&text, &quiet).unwrap();
    assert!(log.parsing_errors.is_empty());
}

#[test]
fn test_malformed_timestamp_fails_parse() {
    let text = LogBuilder::new()
        .execution_started(0)
        .raw("09:00:00.0|METHOD_ENTRY|[1]|01p|Foo.bar()")
        .build();

    let err = parse_log(&text).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(
        err.to_string(),
        "Parse error: Malformed timestamp on line 2: '09:00:00.0'"
    );
}

#[test]
fn test_debug_levels_and_size() {
    let text = LogBuilder::new()
        .with_header()
        .execution_started(0)
        .execution_finished(1)
        .build();

    let log = parse_log(&text).unwrap();

    assert_eq!(log.size, text.len());
    assert_eq!(log.debug_levels.len(), 8);
    assert_eq!(log.debug_levels[0].category, "APEX_CODE");
    assert_eq!(log.debug_levels[0].level, "FINEST");
    assert_eq!(log.debug_levels[7].category, "WORKFLOW");
}

#[test]
fn test_empty_log() {
    let log = parse_log("").unwrap();
    assert!(log.root.children.is_empty());
    assert!(log.issues.is_empty());
    assert_eq!(log.size, 0);
}
