// EventHistory entity
// Immutable audit record of every before/after mutation to an event's
// position, time or status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Event;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventHistory {
    pub id: Uuid,
    pub event_id: Uuid,
    pub reason: String,
    pub before: EventSnapshot,
    pub after: EventSnapshot,
    pub created_at: i64,
}

/// The mutable slice of an event captured on either side of a change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub lat: f64,
    pub lng: f64,
    pub status: String,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub time_known: bool,
}

impl EventSnapshot {
    pub fn of(event: &Event) -> Self {
        Self {
            lat: event.lat,
            lng: event.lng,
            status: event.status.as_str().to_string(),
            start_at: event.start_at,
            end_at: event.end_at,
            time_known: event.time_known,
        }
    }
}
