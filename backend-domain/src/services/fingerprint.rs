// Reporter identity hasher
// Derives a stable opaque token from connection metadata so naive repeat
// submissions from one origin collapse, without identifying anyone.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Same input yields the same token within a salt epoch; not reversible
/// without the salt.
pub fn reporter_fingerprint(salt: &str, remote_addr: &str, user_agent: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .expect("hmac accepts keys of any length");
    mac.update(remote_addr.as_bytes());
    mac.update(b"|");
    mac.update(user_agent.as_bytes());
    let digest = mac.finalize().into_bytes();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_same_token() {
        let a = reporter_fingerprint("salt", "203.0.113.7", "Mozilla/5.0");
        let b = reporter_fingerprint("salt", "203.0.113.7", "Mozilla/5.0");
        assert_eq!(a, b);
    }

    #[test]
    fn token_is_fixed_length_hex() {
        let token = reporter_fingerprint("salt", "203.0.113.7", "Mozilla/5.0");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn different_origin_or_salt_changes_token() {
        let base = reporter_fingerprint("salt", "203.0.113.7", "Mozilla/5.0");
        assert_ne!(base, reporter_fingerprint("salt", "203.0.113.8", "Mozilla/5.0"));
        assert_ne!(base, reporter_fingerprint("salt", "203.0.113.7", "curl/8.0"));
        assert_ne!(base, reporter_fingerprint("other", "203.0.113.7", "Mozilla/5.0"));
    }
}
