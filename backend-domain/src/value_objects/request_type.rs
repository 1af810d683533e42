// Change-request type value object

use serde::{Deserialize, Serialize};

use crate::value_objects::ReportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeRequestType {
    CreateEvent,
    ReportStart,
    ReportEnd,
    ReportMove,
    ReportTimeChange,
    RivalActivity,
}

impl ChangeRequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeRequestType::CreateEvent => "create-event",
            ChangeRequestType::ReportStart => "report-start",
            ChangeRequestType::ReportEnd => "report-end",
            ChangeRequestType::ReportMove => "report-move",
            ChangeRequestType::ReportTimeChange => "report-time-change",
            ChangeRequestType::RivalActivity => "rival-activity",
        }
    }

    /// The report kind whose quorum resolves this request, for the two
    /// types that only ever resolve through the promotion paths.
    pub fn promotion_kind(&self) -> Option<ReportKind> {
        match self {
            ChangeRequestType::ReportStart => Some(ReportKind::Start),
            ChangeRequestType::ReportEnd => Some(ReportKind::End),
            _ => None,
        }
    }
}

impl From<&str> for ChangeRequestType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "report-start" => ChangeRequestType::ReportStart,
            "report-end" => ChangeRequestType::ReportEnd,
            "report-move" => ChangeRequestType::ReportMove,
            "report-time-change" => ChangeRequestType::ReportTimeChange,
            "rival-activity" => ChangeRequestType::RivalActivity,
            _ => ChangeRequestType::CreateEvent,
        }
    }
}
