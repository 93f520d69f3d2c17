use crate::Result;
use serde::{Deserialize, Serialize};

/// Switches for the optional post-processing passes.
///
/// ```toml
/// package_wrappers = true
/// resolve_namespaces = false
/// collect_parsing_errors = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Merge adjacent package entries and move DML/SOQL under them
    pub package_wrappers: bool,

    /// Annotate nodes with the namespace of a top-level package
    pub resolve_namespaces: bool,

    /// Keep unknown tags and stray lines in `ApexLog::parsing_errors`
    pub collect_parsing_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            package_wrappers: true,
            resolve_namespaces: true,
            collect_parsing_errors: true,
        }
    }
}

impl ParseOptions {
    /// Options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
