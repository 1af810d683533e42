use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    reports_accepted: AtomicU64,
    report_conflicts: AtomicU64,
    promotions: AtomicU64,
    requests_accepted: AtomicU64,
    requests_throttled: AtomicU64,
    requests_approved: AtomicU64,
    requests_rejected: AtomicU64,
    duplicates_marked: AtomicU64,
    sweep_runs: AtomicU64,
}

impl Metrics {
    pub fn record_report(&self) {
        self.reports_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_report_conflict(&self) {
        self.report_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_promotion(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request(&self) {
        self.requests_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_throttled(&self) {
        self.requests_throttled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_approved(&self, count: u64) {
        self.requests_approved.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_rejected(&self, count: u64) {
        self.requests_rejected.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_duplicates(&self, count: u64) {
        self.duplicates_marked.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_sweep(&self) {
        self.sweep_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let mut out = String::new();
        for (name, value) in [
            ("canvass_reports_accepted_total", &self.reports_accepted),
            ("canvass_report_conflicts_total", &self.report_conflicts),
            ("canvass_promotions_total", &self.promotions),
            ("canvass_requests_accepted_total", &self.requests_accepted),
            ("canvass_requests_throttled_total", &self.requests_throttled),
            ("canvass_requests_approved_total", &self.requests_approved),
            ("canvass_requests_rejected_total", &self.requests_rejected),
            ("canvass_duplicates_marked_total", &self.duplicates_marked),
            ("canvass_sweep_runs_total", &self.sweep_runs),
        ] {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                value.load(Ordering::Relaxed)
            ));
        }
        out
    }
}
