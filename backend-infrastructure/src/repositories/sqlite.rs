use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use backend_domain::ports::{
    ChangeRequestRepository, EventHistoryRepository, EventRepository, MoveHintRepository,
    ReportRepository,
};
use backend_domain::{
    ChangeRequest, ChangeRequestPayload, ChangeRequestStatus, ChangeRequestType, Event,
    EventHistory, EventStatus, MoveHint, NewEvent, Report, ReportInsert, ReportKind,
};

/// SQLite-backed implementation of every store port. The report table's
/// unique index is what makes report intake atomic: insert and
/// uniqueness check are one statement, not a check-then-act.
#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_path: &str) -> Result<Self> {
        let (url, max_connections) = if database_path == ":memory:" {
            // A pooled in-memory database must stay on one connection or
            // each checkout sees its own empty database.
            ("sqlite::memory:".to_string(), 1)
        } else {
            (format!("sqlite://{}?mode=rwc", database_path), 20)
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(&url)
            .await
            .with_context(|| format!("opening database {}", database_path))?;

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
        sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Idempotent, safe to run on every startup.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                candidate_id TEXT,
                venue TEXT NOT NULL,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                status TEXT NOT NULL,
                start_at INTEGER,
                end_at INTEGER,
                time_known INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                lat REAL,
                lng REAL,
                fingerprint TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        // Exactly-once per (event, kind, reporter); promotion correctness
        // rests on this index, not on application checks.
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_reports_once_per_reporter
            ON reports(event_id, kind, fingerprint)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS move_hints (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                report_count INTEGER NOT NULL,
                last_report_at INTEGER NOT NULL,
                active INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_move_hints_event_active ON move_hints(event_id, active)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS change_requests (
                id TEXT PRIMARY KEY,
                request_type TEXT NOT NULL,
                candidate_id TEXT,
                event_id TEXT,
                rival_event_id TEXT,
                payload TEXT NOT NULL,
                dedupe_key TEXT,
                status TEXT NOT NULL,
                reviewer TEXT,
                reviewed_at INTEGER,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_change_requests_status ON change_requests(status)",
        )
        .execute(&self.pool)
        .await?;
        // Plain index only: the dedupe key is advisory grouping, never a
        // uniqueness constraint.
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_change_requests_dedupe ON change_requests(dedupe_key)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS event_history (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                reason TEXT NOT NULL,
                before_json TEXT NOT NULL,
                after_json TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    candidate_id: Option<String>,
    venue: String,
    lat: f64,
    lng: f64,
    status: String,
    start_at: Option<i64>,
    end_at: Option<i64>,
    time_known: bool,
    created_at: i64,
}

impl EventRow {
    fn into_event(self) -> Result<Event> {
        Ok(Event {
            id: Uuid::parse_str(&self.id)?,
            candidate_id: self.candidate_id.as_deref().map(Uuid::parse_str).transpose()?,
            venue: self.venue,
            lat: self.lat,
            lng: self.lng,
            status: EventStatus::from(self.status.as_str()),
            start_at: self.start_at,
            end_at: self.end_at,
            time_known: self.time_known,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: String,
    event_id: String,
    kind: String,
    lat: Option<f64>,
    lng: Option<f64>,
    fingerprint: String,
    created_at: i64,
}

impl ReportRow {
    fn into_report(self) -> Result<Report> {
        Ok(Report {
            id: Uuid::parse_str(&self.id)?,
            event_id: Uuid::parse_str(&self.event_id)?,
            kind: ReportKind::from(self.kind.as_str()),
            lat: self.lat,
            lng: self.lng,
            fingerprint: self.fingerprint,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MoveHintRow {
    id: String,
    event_id: String,
    lat: f64,
    lng: f64,
    report_count: i64,
    last_report_at: i64,
    active: bool,
}

impl MoveHintRow {
    fn into_hint(self) -> Result<MoveHint> {
        Ok(MoveHint {
            id: Uuid::parse_str(&self.id)?,
            event_id: Uuid::parse_str(&self.event_id)?,
            lat: self.lat,
            lng: self.lng,
            report_count: self.report_count,
            last_report_at: self.last_report_at,
            active: self.active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ChangeRequestRow {
    id: String,
    request_type: String,
    candidate_id: Option<String>,
    event_id: Option<String>,
    rival_event_id: Option<String>,
    payload: String,
    dedupe_key: Option<String>,
    status: String,
    reviewer: Option<String>,
    reviewed_at: Option<i64>,
    created_at: i64,
}

impl ChangeRequestRow {
    fn into_request(self) -> Result<ChangeRequest> {
        let payload: ChangeRequestPayload =
            serde_json::from_str(&self.payload).context("decoding change request payload")?;
        Ok(ChangeRequest {
            id: Uuid::parse_str(&self.id)?,
            request_type: ChangeRequestType::from(self.request_type.as_str()),
            candidate_id: self.candidate_id.as_deref().map(Uuid::parse_str).transpose()?,
            event_id: self.event_id.as_deref().map(Uuid::parse_str).transpose()?,
            rival_event_id: self
                .rival_event_id
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()?,
            payload,
            dedupe_key: self.dedupe_key,
            status: ChangeRequestStatus::from(self.status.as_str()),
            reviewer: self.reviewer,
            reviewed_at: self.reviewed_at,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl EventRepository for SqliteRepo {
    async fn get(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, candidate_id, venue, lat, lng, status, start_at, end_at, time_known, created_at
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(EventRow::into_event).transpose()
    }

    async fn create(&self, event: &NewEvent, now: i64) -> Result<Event> {
        let created = Event {
            id: Uuid::new_v4(),
            candidate_id: event.candidate_id,
            venue: event.venue.clone(),
            lat: event.lat,
            lng: event.lng,
            status: EventStatus::Planned,
            start_at: event.start_at,
            end_at: event.end_at,
            time_known: event.time_known(),
            created_at: now,
        };
        sqlx::query(
            r#"
            INSERT INTO events (id, candidate_id, venue, lat, lng, status, start_at, end_at, time_known, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(created.id.to_string())
        .bind(created.candidate_id.map(|id| id.to_string()))
        .bind(&created.venue)
        .bind(created.lat)
        .bind(created.lng)
        .bind(created.status.as_str())
        .bind(created.start_at)
        .bind(created.end_at)
        .bind(created.time_known)
        .bind(created.created_at)
        .execute(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_status(&self, id: Uuid, status: EventStatus) -> Result<()> {
        sqlx::query("UPDATE events SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_position(&self, id: Uuid, lat: f64, lng: f64) -> Result<()> {
        sqlx::query("UPDATE events SET lat = ?, lng = ? WHERE id = ?")
            .bind(lat)
            .bind(lng)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_times(
        &self,
        id: Uuid,
        start_at: Option<i64>,
        end_at: Option<i64>,
        time_known: bool,
    ) -> Result<()> {
        sqlx::query("UPDATE events SET start_at = ?, end_at = ?, time_known = ? WHERE id = ?")
            .bind(start_at)
            .bind(end_at)
            .bind(time_known)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for SqliteRepo {
    async fn insert(&self, report: &Report) -> Result<ReportInsert> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO reports (id, event_id, kind, lat, lng, fingerprint, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(report.id.to_string())
        .bind(report.event_id.to_string())
        .bind(report.kind.as_str())
        .bind(report.lat)
        .bind(report.lng)
        .bind(&report.fingerprint)
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            Ok(ReportInsert::Duplicate)
        } else {
            Ok(ReportInsert::Inserted)
        }
    }

    async fn count_by_event_and_kind(&self, event_id: Uuid, kind: ReportKind) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reports WHERE event_id = ? AND kind = ?")
                .bind(event_id.to_string())
                .bind(kind.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count.0)
    }

    async fn list_positioned_move_reports(&self, event_id: Uuid) -> Result<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, event_id, kind, lat, lng, fingerprint, created_at
            FROM reports
            WHERE event_id = ? AND kind = 'move' AND lat IS NOT NULL AND lng IS NOT NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ReportRow::into_report).collect()
    }
}

#[async_trait]
impl MoveHintRepository for SqliteRepo {
    async fn list_active_by_event(&self, event_id: Uuid) -> Result<Vec<MoveHint>> {
        let rows = sqlx::query_as::<_, MoveHintRow>(
            r#"
            SELECT id, event_id, lat, lng, report_count, last_report_at, active
            FROM move_hints
            WHERE event_id = ? AND active = 1
            ORDER BY report_count DESC
            "#,
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(MoveHintRow::into_hint).collect()
    }

    async fn upsert(&self, hint: &MoveHint) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO move_hints (id, event_id, lat, lng, report_count, last_report_at, active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                lat = excluded.lat,
                lng = excluded.lng,
                report_count = excluded.report_count,
                last_report_at = excluded.last_report_at,
                active = excluded.active
            "#,
        )
        .bind(hint.id.to_string())
        .bind(hint.event_id.to_string())
        .bind(hint.lat)
        .bind(hint.lng)
        .bind(hint.report_count)
        .bind(hint.last_report_at)
        .bind(hint.active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn deactivate(&self, ids: &[Uuid]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE move_hints SET active = 0 WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        builder.push(")");
        builder.build().execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ChangeRequestRepository for SqliteRepo {
    async fn insert(&self, request: &ChangeRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO change_requests
                (id, request_type, candidate_id, event_id, rival_event_id, payload, dedupe_key,
                 status, reviewer, reviewed_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.id.to_string())
        .bind(request.request_type.as_str())
        .bind(request.candidate_id.map(|id| id.to_string()))
        .bind(request.event_id.map(|id| id.to_string()))
        .bind(request.rival_event_id.map(|id| id.to_string()))
        .bind(serde_json::to_string(&request.payload)?)
        .bind(&request.dedupe_key)
        .bind(request.status.as_str())
        .bind(&request.reviewer)
        .bind(request.reviewed_at)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ChangeRequest>> {
        let row = sqlx::query_as::<_, ChangeRequestRow>(
            r#"
            SELECT id, request_type, candidate_id, event_id, rival_event_id, payload, dedupe_key,
                   status, reviewer, reviewed_at, created_at
            FROM change_requests
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(ChangeRequestRow::into_request).transpose()
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ChangeRequest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT id, request_type, candidate_id, event_id, rival_event_id, payload, dedupe_key,
                   status, reviewer, reviewed_at, created_at
            FROM change_requests
            WHERE id IN (
            "#,
        );
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        builder.push(") ORDER BY created_at ASC");
        let rows = builder
            .build_query_as::<ChangeRequestRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(ChangeRequestRow::into_request).collect()
    }

    async fn list_pending_report_requests(&self) -> Result<Vec<ChangeRequest>> {
        let rows = sqlx::query_as::<_, ChangeRequestRow>(
            r#"
            SELECT id, request_type, candidate_id, event_id, rival_event_id, payload, dedupe_key,
                   status, reviewer, reviewed_at, created_at
            FROM change_requests
            WHERE status = 'pending' AND request_type IN ('report-start', 'report-end')
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ChangeRequestRow::into_request).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ChangeRequestStatus,
        reviewer: Option<&str>,
        reviewed_at: i64,
    ) -> Result<()> {
        // Pending is the only non-terminal state; the guard makes racing
        // resolvers (moderation vs sweep) last-writer-safe.
        sqlx::query(
            r#"
            UPDATE change_requests
            SET status = ?, reviewer = ?, reviewed_at = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(status.as_str())
        .bind(reviewer)
        .bind(reviewed_at)
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_pending_duplicates_by_dedupe_key(
        &self,
        dedupe_key: &str,
        reviewer: Option<&str>,
        reviewed_at: i64,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE change_requests
            SET status = 'duplicate', reviewer = ?, reviewed_at = ?
            WHERE dedupe_key = ? AND status = 'pending'
            "#,
        )
        .bind(reviewer)
        .bind(reviewed_at)
        .bind(dedupe_key)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EventHistoryRepository for SqliteRepo {
    async fn insert(&self, history: &EventHistory) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO event_history (id, event_id, reason, before_json, after_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(history.id.to_string())
        .bind(history.event_id.to_string())
        .bind(&history.reason)
        .bind(serde_json::to_string(&history.before)?)
        .bind(serde_json::to_string(&history.after)?)
        .bind(history.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteRepo {
        let repo = SqliteRepo::connect(":memory:").await.expect("connect");
        repo.ensure_schema().await.expect("schema");
        repo
    }

    fn report(event_id: Uuid, kind: ReportKind, fingerprint: &str) -> Report {
        Report {
            id: Uuid::new_v4(),
            event_id,
            kind,
            lat: None,
            lng: None,
            fingerprint: fingerprint.to_string(),
            created_at: 1_000,
        }
    }

    async fn planned_event(repo: &SqliteRepo) -> Event {
        repo.create(
            &NewEvent {
                candidate_id: None,
                venue: "market square".to_string(),
                lat: 52.52,
                lng: 13.405,
                start_at: None,
                end_at: None,
            },
            1_000,
        )
        .await
        .expect("create event")
    }

    #[tokio::test]
    async fn report_uniqueness_is_enforced_by_the_store() {
        let repo = repo().await;
        let event = planned_event(&repo).await;

        let first = report(event.id, ReportKind::Start, "fp-1");
        assert_eq!(
            ReportRepository::insert(&repo, &first).await.unwrap(),
            ReportInsert::Inserted
        );

        // Same (event, kind, fingerprint), different row id.
        let second = report(event.id, ReportKind::Start, "fp-1");
        assert_eq!(
            ReportRepository::insert(&repo, &second).await.unwrap(),
            ReportInsert::Duplicate
        );

        // Different kind from the same reporter is a new signal.
        let other_kind = report(event.id, ReportKind::End, "fp-1");
        assert_eq!(
            ReportRepository::insert(&repo, &other_kind).await.unwrap(),
            ReportInsert::Inserted
        );

        assert_eq!(
            repo.count_by_event_and_kind(event.id, ReportKind::Start)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn event_status_round_trips() {
        let repo = repo().await;
        let event = planned_event(&repo).await;
        assert_eq!(event.status, EventStatus::Planned);

        EventRepository::update_status(&repo, event.id, EventStatus::Live)
            .await
            .unwrap();
        let reloaded = EventRepository::get(&repo, event.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, EventStatus::Live);
        assert_eq!(reloaded.venue, "market square");
    }

    #[tokio::test]
    async fn positioned_move_reports_come_back_oldest_first() {
        let repo = repo().await;
        let event = planned_event(&repo).await;

        let mut late = report(event.id, ReportKind::Move, "fp-late");
        late.lat = Some(52.521);
        late.lng = Some(13.406);
        late.created_at = 2_000;
        let mut early = report(event.id, ReportKind::Move, "fp-early");
        early.lat = Some(52.520);
        early.lng = Some(13.405);
        early.created_at = 1_000;
        // No position; must not appear in the clustering input.
        let blind = report(event.id, ReportKind::Move, "fp-blind");

        for row in [&late, &early, &blind] {
            ReportRepository::insert(&repo, row).await.unwrap();
        }

        let listed = repo.list_positioned_move_reports(event.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].fingerprint, "fp-early");
        assert_eq!(listed[1].fingerprint, "fp-late");
    }

    #[tokio::test]
    async fn hint_upsert_and_deactivate() {
        let repo = repo().await;
        let event_id = Uuid::new_v4();
        let hint = MoveHint {
            id: Uuid::new_v4(),
            event_id,
            lat: 52.52,
            lng: 13.405,
            report_count: 2,
            last_report_at: 5_000,
            active: true,
        };
        repo.upsert(&hint).await.unwrap();

        let mut refreshed = hint.clone();
        refreshed.report_count = 3;
        repo.upsert(&refreshed).await.unwrap();

        let active = repo.list_active_by_event(event_id).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].report_count, 3);

        repo.deactivate(&[hint.id]).await.unwrap();
        assert!(repo.list_active_by_event(event_id).await.unwrap().is_empty());
    }

    fn pending_request(dedupe_key: Option<&str>) -> ChangeRequest {
        ChangeRequest {
            id: Uuid::new_v4(),
            request_type: ChangeRequestType::CreateEvent,
            candidate_id: None,
            event_id: None,
            rival_event_id: None,
            payload: ChangeRequestPayload::default(),
            dedupe_key: dedupe_key.map(ToString::to_string),
            status: ChangeRequestStatus::Pending,
            reviewer: None,
            reviewed_at: None,
            created_at: 1_000,
        }
    }

    #[tokio::test]
    async fn duplicate_marking_only_touches_pending_rows_with_the_key() {
        let repo = repo().await;
        let shared_a = pending_request(Some("key-1"));
        let shared_b = pending_request(Some("key-1"));
        let unrelated = pending_request(Some("key-2"));
        for request in [&shared_a, &shared_b, &unrelated] {
            ChangeRequestRepository::insert(&repo, request).await.unwrap();
        }
        ChangeRequestRepository::update_status(
            &repo,
            shared_a.id,
            ChangeRequestStatus::Approved,
            Some("riley"),
            2_000,
        )
        .await
        .unwrap();

        let marked = repo
            .mark_pending_duplicates_by_dedupe_key("key-1", Some("riley"), 2_000)
            .await
            .unwrap();
        assert_eq!(marked, 1);

        let rows = repo
            .list_by_ids(&[shared_a.id, shared_b.id, unrelated.id])
            .await
            .unwrap();
        let status_of = |id: Uuid| rows.iter().find(|row| row.id == id).unwrap().status;
        assert_eq!(status_of(shared_a.id), ChangeRequestStatus::Approved);
        assert_eq!(status_of(shared_b.id), ChangeRequestStatus::Duplicate);
        assert_eq!(status_of(unrelated.id), ChangeRequestStatus::Pending);
    }

    #[tokio::test]
    async fn status_updates_skip_already_resolved_rows() {
        let repo = repo().await;
        let request = pending_request(None);
        ChangeRequestRepository::insert(&repo, &request).await.unwrap();

        ChangeRequestRepository::update_status(
            &repo,
            request.id,
            ChangeRequestStatus::Rejected,
            Some("riley"),
            2_000,
        )
        .await
        .unwrap();
        // A later resolver loses the race; the row stays Rejected.
        ChangeRequestRepository::update_status(
            &repo,
            request.id,
            ChangeRequestStatus::Approved,
            Some("casey"),
            3_000,
        )
        .await
        .unwrap();

        let reloaded = ChangeRequestRepository::get(&repo, request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, ChangeRequestStatus::Rejected);
        assert_eq!(reloaded.reviewer.as_deref(), Some("riley"));
    }
}
