//! Event constructors.
//!
//! Each constructor is a pure function of the tokenized line: it indexes
//! into the `|` separated parts and never touches parser state. Anything
//! that needs the following event or the session lives in `hooks`.

pub mod callout;
pub mod code;
pub mod database;
pub mod diagnostics;
pub mod flow;
pub mod generic;
pub mod system;
