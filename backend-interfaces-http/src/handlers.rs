pub mod moderation_handlers;
pub mod ops_handlers;
pub mod report_handlers;
pub mod request_handlers;

pub use moderation_handlers::*;
pub use ops_handlers::*;
pub use report_handlers::*;
pub use request_handlers::*;
