use serde::{Deserialize, Serialize};

/// Structural role of an event in the call tree.
///
/// The role decides how the tree builder treats an event; the concrete
/// tag only matters for matching exits against `exit_types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventRole {
    /// Leaf event with no children and no duration.
    #[default]
    Basic,
    /// Closes an enclosing begin event (METHOD_EXIT, DML_END, ...).
    Exit,
    /// Can own children and carries timing. A begin with no exit types
    /// behaves as a leaf during tree building.
    Begin,
}

/// Timeline bucket an event is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[serde(rename = "Code Unit")]
    CodeUnit,
    Workflow,
    Method,
    Flow,
    #[serde(rename = "DML")]
    Dml,
    #[serde(rename = "SOQL")]
    Soql,
    #[serde(rename = "System Method")]
    SystemMethod,
    #[default]
    #[serde(rename = "")]
    None,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CodeUnit => "Code Unit",
            Category::Workflow => "Workflow",
            Category::Method => "Method",
            Category::Flow => "Flow",
            Category::Dml => "DML",
            Category::Soql => "SOQL",
            Category::SystemMethod => "System Method",
            Category::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::SystemMethod).unwrap();
        assert_eq!(json, "\"System Method\"");
        assert_eq!(Category::Dml.as_str(), "DML");
    }

    #[test]
    fn test_default_role_is_basic() {
        assert_eq!(EventRole::default(), EventRole::Basic);
    }
}
