use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Duplicate report from the same fingerprint+kind+event. Surfaced
    /// distinctly so clients treat it as idempotent success.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("throttled, retry after {retry_after_seconds}s")]
    Throttled { retry_after_seconds: u64 },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
