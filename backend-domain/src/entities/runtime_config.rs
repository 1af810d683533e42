// Runtime configuration handed from infrastructure to the application layer.

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    /// Staff bearer token for moderation endpoints. None disables the check.
    pub api_token: Option<String>,
    /// Shared-secret bearer token for the scheduled sweep trigger.
    pub sweep_token: Option<String>,
    pub database_path: String,
    /// Server-side salt for reporter fingerprints. Rotating it starts a
    /// new fingerprint epoch.
    pub reporter_salt: String,
    /// Independent same-kind reports required before an automatic
    /// status promotion fires.
    pub report_quorum: i64,
    pub throttle_limit: usize,
    pub throttle_window_seconds: u64,
    /// Radius for folding a move report into an existing cluster.
    pub cluster_radius_m: f64,
    /// Radius for matching a recomputed cluster to an existing active
    /// hint. Kept separate from cluster_radius_m: unifying the two
    /// changes hint stability across recomputation passes.
    pub hint_match_radius_m: f64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}
