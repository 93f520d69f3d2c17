use apexlog_types::{GovernorLimits, Limit, Nanos};
use regex::Regex;
use std::sync::LazyLock;

/// `  Number of SOQL queries: 2 out of 100`
static LIMIT_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:]+?):\s*(\d+)\s+out of\s+(\d+)").unwrap());

/// CPU time is reported in milliseconds.
static CPU_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Maximum CPU time: (\d+)").unwrap());

const NANOS_PER_MILLI: Nanos = 1_000_000;

/// Parse the lines of a limit usage block. Unknown labels are ignored.
pub fn parse_limit_usage(text: &str) -> GovernorLimits {
    let mut limits = GovernorLimits::default();
    for line in text.lines() {
        let Some(caps) = LIMIT_LINE_REGEX.captures(line) else {
            continue;
        };
        let (Ok(used), Ok(max)) = (caps[2].parse(), caps[3].parse()) else {
            continue;
        };
        limits.set(caps[1].trim(), Limit { used, max });
    }
    limits
}

/// CPU time reported by a limit usage block, in nanoseconds. Values that
/// do not fit are ignored.
pub fn cpu_time(text: &str) -> Option<Nanos> {
    let caps = CPU_TIME_REGEX.captures(text)?;
    let millis: Nanos = caps[1].parse().ok()?;
    millis.checked_mul(NANOS_PER_MILLI)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "(default)
  Number of SOQL queries: 2 out of 100
  Number of query rows: 14 out of 50000
  Maximum CPU time: 32 out of 10000
  Maximum heap size: 0 out of 6000000
  Number of unicorns: 1 out of 1";

    #[test]
    fn test_parse_limit_usage() {
        let limits = parse_limit_usage(BLOCK);
        assert_eq!(limits.soql_queries, Limit { used: 2, max: 100 });
        assert_eq!(limits.query_rows, Limit { used: 14, max: 50000 });
        assert_eq!(limits.cpu_time, Limit { used: 32, max: 10000 });
        assert_eq!(limits.heap_size, Limit { used: 0, max: 6000000 });
    }

    #[test]
    fn test_cpu_time_in_nanos() {
        assert_eq!(cpu_time(BLOCK), Some(32_000_000));
        assert_eq!(cpu_time("(default)"), None);
    }

    #[test]
    fn test_cpu_time_overflow_is_ignored() {
        assert_eq!(cpu_time("  Maximum CPU time: 99999999999999 out of 10000"), None);
        assert_eq!(cpu_time("  Maximum CPU time: 99999999999999999999 out of 10000"), None);
    }
}
