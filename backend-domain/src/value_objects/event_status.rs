// Event status value object
// Automatic promotion only ever advances this: Planned -> Live -> Ended.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Planned,
    Live,
    Ended,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "planned",
            EventStatus::Live => "live",
            EventStatus::Ended => "ended",
        }
    }

    /// Ordering used by the monotonicity check: a promotion to a target
    /// at or below the current rank is a no-op.
    pub fn rank(&self) -> u8 {
        match self {
            EventStatus::Planned => 0,
            EventStatus::Live => 1,
            EventStatus::Ended => 2,
        }
    }
}

impl From<&str> for EventStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "live" => EventStatus::Live,
            "ended" => EventStatus::Ended,
            _ => EventStatus::Planned,
        }
    }
}
