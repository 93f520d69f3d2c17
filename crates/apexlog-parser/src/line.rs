use apexlog_types::{LineNumber, Nanos};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, Result};

/// Marker of the first line that belongs to the trace; anything before
/// it is header/preamble.
pub const EXECUTION_STARTED: &str = "EXECUTION_STARTED";

/// Strict type tag pattern. Lines whose second field fails this are
/// candidates for continuation text.
static TYPE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z_]*$").unwrap());

/// Whether `tag` looks like an event type tag.
pub fn is_type_tag(tag: &str) -> bool {
    TYPE_TAG_REGEX.is_match(tag)
}

/// Physical lines of the trace, starting at the first EXECUTION_STARTED
/// line. Yields 1-based line numbers relative to the full input.
/// Handles both `\n` and `\r\n` line endings.
pub fn log_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let start = text
        .find(EXECUTION_STARTED)
        .map(|idx| text[..idx].rfind('\n').map_or(0, |nl| nl + 1))
        .unwrap_or(0);
    let first_line = text[..start].matches('\n').count() + 1;

    text[start..]
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(move |(idx, line)| (first_line + idx, line))
}

/// A tokenized event line. Ephemeral: only lives until the event is
/// constructed.
#[derive(Debug, Clone)]
pub struct RawLine<'a> {
    /// 1-based line number in the input
    pub line_number: usize,
    /// The whole physical line
    pub text: &'a str,
    /// Wall-clock part of the leading field, when it parses
    pub wall_clock: Option<NaiveTime>,
    /// Nanoseconds since transaction start
    pub timestamp: Nanos,
    /// Every `|` separated part, including the timestamp (0) and tag (1),
    /// so constructors index fields the way they appear on the line
    pub parts: Vec<&'a str>,
}

impl<'a> RawLine<'a> {
    /// Tokenize an event line. Fails when the timestamp field has no
    /// parenthesized nanosecond value.
    pub fn parse(line_number: usize, text: &'a str) -> Result<Self> {
        let parts: Vec<&str> = text.split('|').collect();
        let stamp = parts.first().copied().unwrap_or_default();
        let timestamp = parse_timestamp(stamp).ok_or_else(|| Error::MalformedTimestamp {
            line_number,
            text: stamp.to_string(),
        })?;

        Ok(Self {
            line_number,
            text,
            wall_clock: parse_wall_clock(stamp),
            timestamp,
            parts,
        })
    }

    pub fn event_type(&self) -> &'a str {
        self.field(1)
    }

    /// Field at `idx`, or an empty string when the line is shorter.
    pub fn field(&self, idx: usize) -> &'a str {
        self.parts.get(idx).copied().unwrap_or_default()
    }

    /// Field at `idx` if present and non-empty.
    pub fn non_empty(&self, idx: usize) -> Option<&'a str> {
        self.parts.get(idx).copied().filter(|f| !f.is_empty())
    }

    /// Fields from `idx` onwards, re-joined with `|`.
    pub fn rest(&self, idx: usize) -> String {
        self.parts.get(idx..).map(|p| p.join("|")).unwrap_or_default()
    }

    pub fn line_ref(&self, idx: usize) -> Option<LineNumber> {
        LineNumber::parse(self.field(idx))
    }
}

/// `12:00:00.123 (1234567)` -> 1234567
pub fn parse_timestamp(field: &str) -> Option<Nanos> {
    let open = field.rfind('(')?;
    let inner = field[open + 1..].strip_suffix(')')?;
    inner.trim().parse().ok()
}

fn parse_wall_clock(field: &str) -> Option<NaiveTime> {
    let clock = field.split(" (").next()?.trim();
    NaiveTime::parse_from_str(clock, "%H:%M:%S%.f").ok()
}

/// `Rows:12` -> 12. Missing or malformed counts read as zero.
pub fn parse_rows(field: &str) -> u64 {
    field
        .rsplit(':')
        .next()
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(0)
}

/// `Op:Insert` -> `Insert`
pub fn strip_label<'a>(field: &'a str, label: &str) -> &'a str {
    field.strip_prefix(label).unwrap_or(field)
}
