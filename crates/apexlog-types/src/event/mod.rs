pub mod event;
pub mod payload;
pub mod role;

pub use event::*;
pub use payload::*;
pub use role::*;
