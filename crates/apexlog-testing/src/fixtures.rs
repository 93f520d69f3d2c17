//! Fixtures for log text generation.
//!
//! Provides a fluent builder so tests describe a log as a sequence of
//! events instead of hand-writing pipe-delimited lines.

/// Debug settings header written by `with_header`.
pub const SETTINGS_LINE: &str =
    "64.0 APEX_CODE,FINEST;APEX_PROFILING,INFO;CALLOUT,INFO;DB,INFO;SYSTEM,DEBUG;VALIDATION,INFO;VISUALFORCE,INFO;WORKFLOW,INFO";

/// Builder for Apex debug log text.
///
/// # Example
/// ```
/// use apexlog_testing::LogBuilder;
///
/// let log = LogBuilder::new()
///     .method_entry(100, 1, "Foo.bar()")
///     .method_exit(150, 1, "Foo.bar()")
///     .build();
/// assert!(log.contains("|METHOD_ENTRY|[1]|"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    header: bool,
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the log with the settings line and an anonymous apex
    /// preamble, as the runtime does.
    pub fn with_header(mut self) -> Self {
        self.header = true;
        self
    }

    /// Any event line: `<clock> (<timestamp>)|<event_type>|<fields...>`
    pub fn event(mut self, timestamp: i64, event_type: &str, fields: &[&str]) -> Self {
        let mut line = format!("{} ({})|{}", wall_clock(timestamp), timestamp, event_type);
        for field in fields {
            line.push('|');
            line.push_str(field);
        }
        self.lines.push(line);
        self
    }

    /// A raw physical line (continuation text, markers, garbage).
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn execution_started(self, timestamp: i64) -> Self {
        self.event(timestamp, "EXECUTION_STARTED", &[])
    }

    pub fn execution_finished(self, timestamp: i64) -> Self {
        self.event(timestamp, "EXECUTION_FINISHED", &[])
    }

    pub fn code_unit_started(self, timestamp: i64, name: &str) -> Self {
        self.event(timestamp, "CODE_UNIT_STARTED", &["[EXTERNAL]", name])
    }

    pub fn code_unit_finished(self, timestamp: i64, name: &str) -> Self {
        self.event(timestamp, "CODE_UNIT_FINISHED", &[name])
    }

    pub fn method_entry(self, timestamp: i64, line: u32, name: &str) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "METHOD_ENTRY", &[&line, "01p000000000001", name])
    }

    pub fn method_exit(self, timestamp: i64, line: u32, name: &str) -> Self {
        let line = line_ref(line);
        let class = name.split('.').next().unwrap_or(name);
        self.event(timestamp, "METHOD_EXIT", &[&line, "01p000000000001", class, name])
    }

    pub fn dml_begin(self, timestamp: i64, line: u32, op: &str, object: &str, rows: u64) -> Self {
        let line = line_ref(line);
        let op = format!("Op:{}", op);
        let object = format!("Type:{}", object);
        let rows = format!("Rows:{}", rows);
        self.event(timestamp, "DML_BEGIN", &[&line, &op, &object, &rows])
    }

    pub fn dml_end(self, timestamp: i64, line: u32) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "DML_END", &[&line])
    }

    pub fn soql_begin(self, timestamp: i64, line: u32, query: &str) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "SOQL_EXECUTE_BEGIN", &[&line, "Aggregations:0", query])
    }

    pub fn soql_end(self, timestamp: i64, line: u32, rows: u64) -> Self {
        let line = line_ref(line);
        let rows = format!("Rows:{}", rows);
        self.event(timestamp, "SOQL_EXECUTE_END", &[&line, &rows])
    }

    pub fn exception(self, timestamp: i64, line: u32, message: &str) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "EXCEPTION_THROWN", &[&line, message])
    }

    pub fn fatal_error(self, timestamp: i64, message: &str) -> Self {
        self.event(timestamp, "FATAL_ERROR", &[message])
    }

    pub fn package(self, timestamp: i64, namespace: &str) -> Self {
        self.event(timestamp, "ENTERING_MANAGED_PKG", &[namespace])
    }

    pub fn statement(self, timestamp: i64, line: u32) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "STATEMENT_EXECUTE", &[&line])
    }

    pub fn user_debug(self, timestamp: i64, line: u32, message: &str) -> Self {
        let line = line_ref(line);
        self.event(timestamp, "USER_DEBUG", &[&line, "DEBUG", message])
    }

    pub fn max_size_reached(self) -> Self {
        self.raw("*********** MAXIMUM DEBUG LOG SIZE REACHED ***********")
    }

    pub fn build(&self) -> String {
        self.build_with("\n")
    }

    /// Same log with Windows line endings.
    pub fn build_crlf(&self) -> String {
        self.build_with("\r\n")
    }

    fn build_with(&self, newline: &str) -> String {
        let mut out = String::new();
        if self.header {
            out.push_str(SETTINGS_LINE);
            out.push_str(newline);
            out.push_str("Execute Anonymous: System.debug('hello');");
            out.push_str(newline);
        }
        for line in &self.lines {
            out.push_str(line);
            out.push_str(newline);
        }
        out
    }
}

fn line_ref(line: u32) -> String {
    format!("[{}]", line)
}

/// Wall clock derived from the nanosecond offset, starting at 09:00.
fn wall_clock(timestamp: i64) -> String {
    let millis = timestamp / 1_000_000;
    let secs = millis / 1000;
    format!(
        "09:{:02}:{:02}.{}",
        (secs / 60) % 60,
        secs % 60,
        millis % 1000
    )
}
