pub mod event;
pub mod issue;
pub mod limits;
pub mod settings;
pub mod tree;

pub use event::*;
pub use issue::*;
pub use limits::*;
pub use settings::*;
pub use tree::Walk;
