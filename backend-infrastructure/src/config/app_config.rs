use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub sweep_token: Option<String>,
    pub database_path: String,
    pub reporter_salt: String,
    pub report_quorum: i64,
    pub throttle_limit: usize,
    pub throttle_window_seconds: u64,
    pub cluster_radius_m: f64,
    pub hint_match_radius_m: f64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3450".to_string(),
            api_token: None,
            sweep_token: None,
            database_path: "./canvass.db".to_string(),
            reporter_salt: "change-me".to_string(),
            report_quorum: 2,
            throttle_limit: 10,
            throttle_window_seconds: 60,
            cluster_radius_m: 100.0,
            hint_match_radius_m: 50.0,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("CANVASS_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(sweep_token) = &self.sweep_token {
            if sweep_token.trim().is_empty() {
                self.sweep_token = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if self.database_path != ":memory:" {
            self.database_path = resolve_path(base, &self.database_path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.reporter_salt.trim().is_empty() {
            return Err(anyhow!("reporter_salt must not be empty"));
        }
        if self.report_quorum < 1 {
            return Err(anyhow!("report_quorum must be at least 1"));
        }
        if self.throttle_limit == 0 || self.throttle_window_seconds == 0 {
            return Err(anyhow!("throttle_limit and throttle_window_seconds must be greater than 0"));
        }
        if self.cluster_radius_m <= 0.0 || self.hint_match_radius_m <= 0.0 {
            return Err(anyhow!("clustering radii must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            sweep_token: self.sweep_token.clone(),
            database_path: self.database_path.clone(),
            reporter_salt: self.reporter_salt.clone(),
            report_quorum: self.report_quorum,
            throttle_limit: self.throttle_limit,
            throttle_window_seconds: self.throttle_window_seconds,
            cluster_radius_m: self.cluster_radius_m,
            hint_match_radius_m: self.hint_match_radius_m,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CANVASS_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CANVASS_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("CANVASS_SWEEP_TOKEN") {
            self.sweep_token = Some(value);
        }
        if let Ok(value) = env::var("CANVASS_DATABASE_PATH") {
            self.database_path = value;
        }
        if let Ok(value) = env::var("CANVASS_REPORTER_SALT") {
            self.reporter_salt = value;
        }
        if let Ok(value) = env::var("CANVASS_REPORT_QUORUM") {
            self.report_quorum = value.parse().unwrap_or(self.report_quorum);
        }
        if let Ok(value) = env::var("CANVASS_THROTTLE_LIMIT") {
            self.throttle_limit = value.parse().unwrap_or(self.throttle_limit);
        }
        if let Ok(value) = env::var("CANVASS_THROTTLE_WINDOW_SECONDS") {
            self.throttle_window_seconds = value.parse().unwrap_or(self.throttle_window_seconds);
        }
        if let Ok(value) = env::var("CANVASS_CLUSTER_RADIUS_M") {
            self.cluster_radius_m = value.parse().unwrap_or(self.cluster_radius_m);
        }
        if let Ok(value) = env::var("CANVASS_HINT_MATCH_RADIUS_M") {
            self.hint_match_radius_m = value.parse().unwrap_or(self.hint_match_radius_m);
        }
        if let Ok(value) = env::var("CANVASS_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("CANVASS_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
