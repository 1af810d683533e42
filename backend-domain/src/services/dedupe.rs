// Dedupe key generator
// Coarse who/when/where summary: two independent proposals for the same
// candidate, day, time-of-day bucket and ~100m grid cell collapse to the
// same key. Advisory only - never a write-time uniqueness constraint.

use chrono::{TimeZone, Timelike, Utc};
use uuid::Uuid;

/// Grid step of ~0.001 degrees (~100m at the equator, tighter elsewhere).
const COORD_GRID_DEG: f64 = 0.001;

pub fn dedupe_key(
    candidate_id: Option<Uuid>,
    date: Option<&str>,
    start_at: Option<i64>,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Option<String> {
    let candidate = candidate_id?;
    let date = date?.trim();
    if date.is_empty() {
        return None;
    }
    let lat = lat?;
    let lng = lng?;
    Some(format!(
        "{}|{}|{}|{:.3}|{:.3}",
        candidate,
        date,
        time_bucket(start_at),
        snap(lat),
        snap(lng),
    ))
}

/// hour < 12 -> morning, 12..18 -> afternoon, >= 18 -> evening.
pub fn time_bucket(start_at: Option<i64>) -> &'static str {
    let Some(millis) = start_at else {
        return "unknown";
    };
    let Some(when) = Utc.timestamp_millis_opt(millis).single() else {
        return "unknown";
    };
    match when.hour() {
        0..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    }
}

fn snap(value: f64) -> f64 {
    (value / COORD_GRID_DEG).round() * COORD_GRID_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Uuid {
        Uuid::parse_str("6f2d8aef-94f3-4f2a-9a53-1df1dc1f52a1").unwrap()
    }

    // 10:00 UTC on the given day.
    const MORNING: i64 = 1_735_725_600_000;

    #[test]
    fn nearby_proposals_share_a_key() {
        let a = dedupe_key(Some(candidate()), Some("2025-01-01"), Some(MORNING), Some(52.5201), Some(13.4051));
        let b = dedupe_key(Some(candidate()), Some("2025-01-01"), Some(MORNING), Some(52.5203), Some(13.4049));
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn distant_proposal_gets_a_different_key() {
        let near = dedupe_key(Some(candidate()), Some("2025-01-01"), Some(MORNING), Some(52.5201), Some(13.4051));
        // ~500m further north
        let far = dedupe_key(Some(candidate()), Some("2025-01-01"), Some(MORNING), Some(52.5251), Some(13.4051));
        assert_ne!(near, far);
    }

    #[test]
    fn bucket_boundaries() {
        let day = 1_735_689_600_000_i64; // 2025-01-01T00:00:00Z
        let hour = 3_600_000_i64;
        assert_eq!(time_bucket(Some(day)), "morning");
        assert_eq!(time_bucket(Some(day + 11 * hour)), "morning");
        assert_eq!(time_bucket(Some(day + 12 * hour)), "afternoon");
        assert_eq!(time_bucket(Some(day + 17 * hour)), "afternoon");
        assert_eq!(time_bucket(Some(day + 18 * hour)), "evening");
        assert_eq!(time_bucket(None), "unknown");
    }

    #[test]
    fn missing_fields_yield_no_key() {
        assert_eq!(dedupe_key(None, Some("2025-01-01"), None, Some(1.0), Some(2.0)), None);
        assert_eq!(dedupe_key(Some(candidate()), None, None, Some(1.0), Some(2.0)), None);
        assert_eq!(dedupe_key(Some(candidate()), Some("2025-01-01"), None, None, Some(2.0)), None);
        assert_eq!(dedupe_key(Some(candidate()), Some(" "), None, Some(1.0), Some(2.0)), None);
    }
}
