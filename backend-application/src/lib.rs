// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod state;
pub mod throttle;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
pub use throttle::SlidingWindow;
