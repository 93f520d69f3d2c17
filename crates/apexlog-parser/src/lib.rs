// Error types
pub mod error;

// Line tokenizer
pub mod line;

// Event constructors, grouped by the area of the runtime they describe
pub mod events;

// Tag -> constructor registry
pub mod registry;

// Post-construction hooks that need the following event
mod hooks;

// Per-parse issue tracker
pub mod session;

// Debug level settings line
pub mod settings;

// Limit usage blocks
pub mod limits;

// Event stream builder
pub mod stream;

pub use error::{Error, Result};
pub use line::{RawLine, is_type_tag, log_lines};
pub use registry::{Constructor, is_known_type, lookup};
pub use session::{ParseSession, SessionReport};
pub use settings::parse_debug_levels;
pub use stream::{MAX_SIZE_DESCRIPTION, MAX_SIZE_REACHED, SKIPPED_LINES, parse_events};
