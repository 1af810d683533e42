// Event entity
// A scheduled real-world occurrence (rally, canvass, town hall)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::EventStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub candidate_id: Option<Uuid>,
    pub venue: String,
    pub lat: f64,
    pub lng: f64,
    pub status: EventStatus,
    /// Scheduled start, epoch millis. Absent when the time is not yet known.
    pub start_at: Option<i64>,
    /// Scheduled end, epoch millis.
    pub end_at: Option<i64>,
    pub time_known: bool,
    pub created_at: i64,
}

/// Fields needed to create a new Planned event from an approved proposal.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub candidate_id: Option<Uuid>,
    pub venue: String,
    pub lat: f64,
    pub lng: f64,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
}

impl NewEvent {
    pub fn time_known(&self) -> bool {
        self.start_at.is_some() || self.end_at.is_some()
    }
}
