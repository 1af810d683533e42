// ChangeRequest entity
// A structured, reviewable proposal submitted by the public. Created
// Pending and only ever resolved by moderation or the promotion sweep.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{ChangeRequestStatus, ChangeRequestType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: Uuid,
    pub request_type: ChangeRequestType,
    pub candidate_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub rival_event_id: Option<Uuid>,
    pub payload: ChangeRequestPayload,
    /// Coarse who/when/where summary used for post-hoc duplicate grouping.
    /// Advisory only, never a uniqueness constraint.
    pub dedupe_key: Option<String>,
    pub status: ChangeRequestStatus,
    pub reviewer: Option<String>,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

/// Proposed values carried by a change request. All fields optional;
/// the apply step validates what it needs per request type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeRequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Proposed event date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Proposed start, epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<i64>,
    /// Proposed end, epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Reviewer-triggered bulk resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequestsRequest {
    pub ids: Vec<Uuid>,
    pub action: ModerationAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
}

/// Inbound change-request submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitChangeRequest {
    pub request_type: ChangeRequestType,
    #[serde(default)]
    pub candidate_id: Option<Uuid>,
    #[serde(default)]
    pub event_id: Option<Uuid>,
    #[serde(default)]
    pub rival_event_id: Option<Uuid>,
    #[serde(default)]
    pub payload: ChangeRequestPayload,
    /// Position supplied outside the payload by older submission shapes.
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}
