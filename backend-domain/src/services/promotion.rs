// Quorum promotion rule
// Single evaluation function shared by the real-time intake path and the
// batch sweep, so the two call sites can never drift apart.

use crate::value_objects::{EventStatus, ReportKind};

/// Returns the status the event should advance to, or None when nothing
/// should happen: below quorum, non-promotable kind, or the event is
/// already at or past the target. Never regresses, never double-fires.
pub fn evaluate_promotion(
    status: EventStatus,
    kind: ReportKind,
    report_count: i64,
    quorum: i64,
) -> Option<EventStatus> {
    if report_count < quorum {
        return None;
    }
    let target = match kind {
        ReportKind::Start => EventStatus::Live,
        ReportKind::End => EventStatus::Ended,
        ReportKind::Move | ReportKind::Check => return None,
    };
    if status.rank() >= target.rank() {
        return None;
    }
    Some(target)
}
