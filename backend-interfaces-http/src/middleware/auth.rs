use std::net::SocketAddr;

use axum::http::HeaderMap;

use backend_domain::{ReporterContext, RuntimeConfig};

/// Staff check for moderation endpoints. An unset token disables the
/// check (trusted-network deployments).
pub fn authorize_staff(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    match &config.api_token {
        Some(api_token) => extract_bearer(headers)
            .map(|value| value == *api_token)
            .unwrap_or(false),
        None => true,
    }
}

/// Shared-secret check for the scheduled sweep trigger, enforced only
/// when a sweep token is configured.
pub fn authorize_sweep(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    match &config.sweep_token {
        Some(sweep_token) => extract_bearer(headers)
            .map(|value| value == *sweep_token)
            .unwrap_or(false),
        None => true,
    }
}

/// Connection metadata the reporter fingerprint is derived from: the
/// first X-Forwarded-For hop when present (deployments behind a proxy),
/// otherwise the socket peer, plus the user agent.
pub fn reporter_context(headers: &HeaderMap, peer: SocketAddr) -> ReporterContext {
    let remote_addr = headers
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| peer.ip().to_string());
    let user_agent = headers
        .get("User-Agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    ReporterContext {
        remote_addr,
        user_agent,
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_tokens(api: Option<&str>, sweep: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api.map(ToString::to_string),
            sweep_token: sweep.map(ToString::to_string),
            database_path: ":memory:".to_string(),
            reporter_salt: "salt".to_string(),
            report_quorum: 2,
            throttle_limit: 10,
            throttle_window_seconds: 60,
            cluster_radius_m: 100.0,
            hint_match_radius_m: 50.0,
            max_body_bytes: 1024,
            request_timeout_seconds: 15,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn staff_auth_accepts_matching_bearer() {
        let config = config_with_tokens(Some("secret"), None);
        assert!(authorize_staff(&config, &bearer("secret")));
        assert!(!authorize_staff(&config, &bearer("wrong")));
        assert!(!authorize_staff(&config, &HeaderMap::new()));
    }

    #[test]
    fn unset_tokens_disable_the_checks() {
        let config = config_with_tokens(None, None);
        assert!(authorize_staff(&config, &HeaderMap::new()));
        assert!(authorize_sweep(&config, &HeaderMap::new()));
    }

    #[test]
    fn forwarded_header_wins_over_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-For",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert("User-Agent", HeaderValue::from_static("curl/8.0"));
        let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let ctx = reporter_context(&headers, peer);
        assert_eq!(ctx.remote_addr, "203.0.113.9");
        assert_eq!(ctx.user_agent, "curl/8.0");

        let ctx = reporter_context(&HeaderMap::new(), peer);
        assert_eq!(ctx.remote_addr, "10.0.0.1");
        assert_eq!(ctx.user_agent, "");
    }
}
