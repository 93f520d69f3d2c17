use serde::{Deserialize, Serialize};

/// `used out of max` pair from a limit usage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Limit {
    pub used: u64,
    pub max: u64,
}

/// Governor limit usage reported by a LIMIT_USAGE_FOR_NS block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GovernorLimits {
    pub soql_queries: Limit,
    pub query_rows: Limit,
    pub sosl_queries: Limit,
    pub dml_statements: Limit,
    pub publish_immediate_dml: Limit,
    pub dml_rows: Limit,
    /// Milliseconds
    pub cpu_time: Limit,
    /// Bytes
    pub heap_size: Limit,
    pub callouts: Limit,
    pub email_invocations: Limit,
    pub future_calls: Limit,
    pub queueable_jobs: Limit,
    pub mobile_push_calls: Limit,
}

impl GovernorLimits {
    /// Store a limit by the label the runtime prints for it. Returns false
    /// for labels that are not tracked.
    pub fn set(&mut self, label: &str, limit: Limit) -> bool {
        let slot = match label.to_ascii_lowercase().as_str() {
            "number of soql queries" => &mut self.soql_queries,
            "number of query rows" => &mut self.query_rows,
            "number of sosl queries" => &mut self.sosl_queries,
            "number of dml statements" => &mut self.dml_statements,
            "number of publish immediate dml" => &mut self.publish_immediate_dml,
            "number of dml rows" => &mut self.dml_rows,
            "maximum cpu time" => &mut self.cpu_time,
            "maximum heap size" => &mut self.heap_size,
            "number of callouts" => &mut self.callouts,
            "number of email invocations" => &mut self.email_invocations,
            "number of future calls" => &mut self.future_calls,
            "number of queueable jobs added to the queue" => &mut self.queueable_jobs,
            "number of mobile apex push calls" => &mut self.mobile_push_calls,
            _ => return false,
        };
        *slot = limit;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_label() {
        let mut limits = GovernorLimits::default();
        assert!(limits.set("Number of SOQL queries", Limit { used: 2, max: 100 }));
        assert_eq!(limits.soql_queries, Limit { used: 2, max: 100 });
    }

    #[test]
    fn test_set_unknown_label() {
        let mut limits = GovernorLimits::default();
        assert!(!limits.set("Number of unicorns", Limit { used: 1, max: 1 }));
        assert_eq!(limits, GovernorLimits::default());
    }
}
