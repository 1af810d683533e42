// Change-request status value object
// Pending is the only non-terminal state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeRequestStatus {
    Pending,
    Approved,
    Rejected,
    /// Subsumed by an approved request sharing the same dedupe key.
    /// Distinct from Rejected: not denied on merits.
    Duplicate,
}

impl ChangeRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeRequestStatus::Pending => "pending",
            ChangeRequestStatus::Approved => "approved",
            ChangeRequestStatus::Rejected => "rejected",
            ChangeRequestStatus::Duplicate => "duplicate",
        }
    }
}

impl From<&str> for ChangeRequestStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "approved" => ChangeRequestStatus::Approved,
            "rejected" => ChangeRequestStatus::Rejected,
            "duplicate" => ChangeRequestStatus::Duplicate,
            _ => ChangeRequestStatus::Pending,
        }
    }
}
