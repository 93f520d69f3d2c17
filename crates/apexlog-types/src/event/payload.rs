use serde::{Deserialize, Serialize};

use super::Totals;

/// Type-specific fields extracted from an event line.
///
/// Most events only need their display text; the variants here carry
/// the values that feed database rollups or the two-phase close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    #[default]
    None,

    /// DML_BEGIN: operation, target sObject and rows touched
    Dml {
        operation: String,
        object: String,
        rows: u64,
    },

    /// SOQL_EXECUTE_BEGIN. `rows` is adopted from the matching end line.
    Soql { aggregations: u32, rows: u64 },

    /// SOSL_EXECUTE_BEGIN. `rows` is adopted from the matching end line.
    Sosl { rows: u64 },

    /// SOQL_EXECUTE_END / SOSL_EXECUTE_END
    QueryEnd { rows: u64 },

    /// EXCEPTION_THROWN
    Exception,

    /// USER_DEBUG logging level (DEBUG, INFO, ERROR, ...)
    UserDebug { level: String },

    /// LIMIT_USAGE_FOR_NS block; the limits themselves are parsed from
    /// the accumulated continuation text once the block is complete.
    LimitUsage,
}

impl EventPayload {
    /// Counters this event contributes on its own, before any children.
    pub fn own_totals(&self) -> Totals {
        match self {
            EventPayload::Dml { rows, .. } => Totals {
                dml_count: 1,
                dml_rows: *rows,
                row_count: *rows,
                ..Totals::default()
            },
            EventPayload::Soql { rows, .. } => Totals {
                soql_count: 1,
                soql_rows: *rows,
                row_count: *rows,
                ..Totals::default()
            },
            EventPayload::Sosl { rows } => Totals {
                soql_rows: *rows,
                row_count: *rows,
                ..Totals::default()
            },
            EventPayload::Exception => Totals {
                thrown_count: 1,
                ..Totals::default()
            },
            _ => Totals::default(),
        }
    }

    /// Rows reported by an exit line, if any.
    pub fn exit_rows(&self) -> Option<u64> {
        match self {
            EventPayload::QueryEnd { rows } => Some(*rows),
            _ => None,
        }
    }

    pub fn is_dml(&self) -> bool {
        matches!(self, EventPayload::Dml { .. })
    }

    pub fn is_soql(&self) -> bool {
        matches!(self, EventPayload::Soql { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_totals_for_dml() {
        let payload = EventPayload::Dml {
            operation: "Insert".to_string(),
            object: "Account".to_string(),
            rows: 3,
        };
        let totals = payload.own_totals();
        assert_eq!(totals.dml_count, 1);
        assert_eq!(totals.dml_rows, 3);
        assert_eq!(totals.row_count, 3);
        assert_eq!(totals.soql_count, 0);
    }

    #[test]
    fn test_exception_counts_as_thrown() {
        assert_eq!(EventPayload::Exception.own_totals().thrown_count, 1);
        assert_eq!(EventPayload::None.own_totals(), Totals::default());
    }

    #[test]
    fn test_payload_serialization() {
        let payload = EventPayload::Soql {
            aggregations: 0,
            rows: 12,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "soql");
        assert_eq!(json["data"]["rows"], 12);
    }
}
