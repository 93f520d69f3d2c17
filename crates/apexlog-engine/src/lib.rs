// Engine module - turns a flat event stream into a call tree
// This layer sits between the tokenized events (parser) and the tree consumers

// Error types
pub mod error;

// Options for the optional passes
pub mod options;

// Stack-based tree builder
pub mod builder;

// Post-processing passes
pub mod passes;

// Parsed log and the parse entry points
mod log;

pub use builder::{UNEXPECTED_END, UNEXPECTED_EXIT, build_tree};
pub use error::{Error, Result};
pub use log::{ApexLog, parse_log, parse_log_with};
pub use options::ParseOptions;

// Re-exported so callers only need this crate
pub use apexlog_parser::{MAX_SIZE_REACHED, SKIPPED_LINES};
pub use apexlog_types::{LogEvent, LogStatus, Severity};
