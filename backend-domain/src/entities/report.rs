// Report entity
// One anonymous signal about an event's real-world status.
// Append-only: reports are never mutated or deleted, they are the
// durable evidence log that quorum counting reads from.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{GeoPoint, ReportKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub event_id: Uuid,
    pub kind: ReportKind,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Salted, non-reversible derivation of the reporter's connection
    /// metadata. Unique together with (event_id, kind).
    pub fingerprint: String,
    pub created_at: i64,
}

impl Report {
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }
}

/// Outcome of an insert against the store's uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportInsert {
    Inserted,
    /// A report with the same (event, kind, fingerprint) already exists.
    Duplicate,
}

/// Inbound report submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReportRequest {
    pub event_id: Uuid,
    pub kind: ReportKind,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Connection metadata the fingerprint is derived from.
#[derive(Debug, Clone)]
pub struct ReporterContext {
    pub remote_addr: String,
    pub user_agent: String,
}
