use serde::{Deserialize, Serialize};

/// One `category,level` pair from the log's debug settings line,
/// e.g. `APEX_CODE,FINEST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugLevel {
    pub category: String,
    pub level: String,
}
