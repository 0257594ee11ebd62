//! Utility functions and helpers

use std::sync::atomic::{AtomicU64, Ordering};

/// Join a base URL and path segments with single slashes.
///
/// Segments are percent-encoded, so ids and names cannot inject
/// extra path components or query strings.
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }
    url
}

/// True for empty and whitespace-only input
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Generate a unique request ID
pub fn generate_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:04x}", now, seq & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://api.local/", &["transaction"]), "http://api.local/transaction");
        assert_eq!(join_url("http://api.local", &["budget", "12"]), "http://api.local/budget/12");
        assert_eq!(
            join_url("http://api.local/v1", &["/analytics/", "monthly-summary"]),
            "http://api.local/v1/analytics/monthly-summary"
        );
    }

    #[test]
    fn test_join_url_encodes_segments() {
        assert_eq!(join_url("http://api.local", &["account", "a b?x=1"]), "http://api.local/account/a%20b%3Fx%3D1");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" rent "));
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
