// MoveHint entity
// A derived, non-authoritative location suggestion built from clustered
// move reports. Fully recomputed from the report log on every pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveHint {
    pub id: Uuid,
    pub event_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub report_count: i64,
    pub last_report_at: i64,
    pub active: bool,
}

impl MoveHint {
    pub fn centroid(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
