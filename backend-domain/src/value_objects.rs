// Domain value objects
pub mod event_status;
pub mod geo;
pub mod report_kind;
pub mod request_status;
pub mod request_type;

pub use event_status::*;
pub use geo::*;
pub use report_kind::*;
pub use request_status::*;
pub use request_type::*;
