// Report kind value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Start,
    End,
    Move,
    Check,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Start => "start",
            ReportKind::End => "end",
            ReportKind::Move => "move",
            ReportKind::Check => "check",
        }
    }

    /// Kinds that feed the quorum promotion rule.
    pub fn is_promotable(&self) -> bool {
        matches!(self, ReportKind::Start | ReportKind::End)
    }
}

impl From<&str> for ReportKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "start" => ReportKind::Start,
            "end" => ReportKind::End,
            "move" => ReportKind::Move,
            _ => ReportKind::Check,
        }
    }
}
