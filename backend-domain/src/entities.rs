// Domain entities
pub mod change_request;
pub mod event;
pub mod event_history;
pub mod move_hint;
pub mod report;
pub mod runtime_config;

pub use change_request::*;
pub use event::*;
pub use event_history::*;
pub use move_hint::*;
pub use report::*;
pub use runtime_config::*;
