// Geo clustering engine
// Rebuilds an event's move hints from its complete move-report history.
// Pure functions: the persistence-syncing wrapper lives in the
// application layer so the algorithm is testable on its own.
//
// Two distinct radii are deliberate. Folding reports into clusters uses
// cluster_radius_m; matching recomputed clusters back onto existing
// hints uses the tighter hint_match_radius_m. Unifying them makes
// near-duplicate hint rows oscillate across recomputation passes.

use uuid::Uuid;

use crate::entities::MoveHint;
use crate::value_objects::GeoPoint;

/// Default radius for folding a report into a cluster.
pub const DEFAULT_CLUSTER_RADIUS_M: f64 = 100.0;
/// Default radius for matching a cluster to an existing active hint.
pub const DEFAULT_HINT_MATCH_RADIUS_M: f64 = 50.0;

/// A positioned move report, reduced to what clustering needs.
#[derive(Debug, Clone, Copy)]
pub struct MoveObservation {
    pub position: GeoPoint,
    pub reported_at: i64,
}

/// One recomputed cluster, not yet reconciled against stored hints.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateHint {
    pub centroid: GeoPoint,
    pub report_count: i64,
    pub last_report_at: i64,
}

/// What a recomputation pass should do to the stored hint rows.
#[derive(Debug, Default)]
pub struct HintReconcilePlan {
    /// Existing active hints refreshed in place.
    pub updates: Vec<MoveHint>,
    /// Clusters with no nearby active hint; become new rows.
    pub creates: Vec<CandidateHint>,
    /// Active hints no cluster supported this pass. Deactivated, never
    /// deleted, so history is preserved while unsupported hints fade.
    pub deactivate: Vec<Uuid>,
}

/// Greedy single-pass clustering over the full observation log. Each
/// observation joins the first cluster whose running centroid is within
/// `cluster_radius_m`, otherwise starts a new one. O(n*k) is fine at
/// per-event report volumes.
pub fn cluster_move_reports(
    observations: &[MoveObservation],
    cluster_radius_m: f64,
) -> Vec<CandidateHint> {
    let mut clusters: Vec<ClusterAccumulator> = Vec::new();

    for observation in observations {
        match clusters
            .iter_mut()
            .find(|cluster| cluster.centroid().distance_meters(&observation.position) <= cluster_radius_m)
        {
            Some(cluster) => cluster.fold(observation),
            None => clusters.push(ClusterAccumulator::seeded(observation)),
        }
    }

    clusters.into_iter().map(ClusterAccumulator::finish).collect()
}

/// Matches recomputed clusters against the currently active hints. Each
/// hint absorbs at most one cluster; leftovers on either side become
/// creates or deactivations.
pub fn reconcile_hints(
    active: &[MoveHint],
    candidates: &[CandidateHint],
    hint_match_radius_m: f64,
) -> HintReconcilePlan {
    let mut plan = HintReconcilePlan::default();
    let mut claimed = vec![false; active.len()];

    for candidate in candidates {
        let matched = active
            .iter()
            .enumerate()
            .filter(|(index, hint)| {
                !claimed[*index]
                    && hint.centroid().distance_meters(&candidate.centroid) <= hint_match_radius_m
            })
            .min_by(|(_, a), (_, b)| {
                let da = a.centroid().distance_meters(&candidate.centroid);
                let db = b.centroid().distance_meters(&candidate.centroid);
                da.total_cmp(&db)
            })
            .map(|(index, _)| index);

        match matched {
            Some(index) => {
                claimed[index] = true;
                let mut hint = active[index].clone();
                hint.lat = candidate.centroid.lat;
                hint.lng = candidate.centroid.lng;
                hint.report_count = candidate.report_count;
                hint.last_report_at = candidate.last_report_at;
                hint.active = true;
                plan.updates.push(hint);
            }
            None => plan.creates.push(candidate.clone()),
        }
    }

    for (index, hint) in active.iter().enumerate() {
        if !claimed[index] {
            plan.deactivate.push(hint.id);
        }
    }

    plan
}

struct ClusterAccumulator {
    lat_sum: f64,
    lng_sum: f64,
    count: i64,
    last_report_at: i64,
}

impl ClusterAccumulator {
    fn seeded(observation: &MoveObservation) -> Self {
        Self {
            lat_sum: observation.position.lat,
            lng_sum: observation.position.lng,
            count: 1,
            last_report_at: observation.reported_at,
        }
    }

    fn fold(&mut self, observation: &MoveObservation) {
        self.lat_sum += observation.position.lat;
        self.lng_sum += observation.position.lng;
        self.count += 1;
        self.last_report_at = self.last_report_at.max(observation.reported_at);
    }

    fn centroid(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat_sum / self.count as f64,
            lng: self.lng_sum / self.count as f64,
        }
    }

    fn finish(self) -> CandidateHint {
        CandidateHint {
            centroid: GeoPoint {
                lat: self.lat_sum / self.count as f64,
                lng: self.lng_sum / self.count as f64,
            },
            report_count: self.count,
            last_report_at: self.last_report_at,
        }
    }
}
