//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` evaluation for conditional requests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from file content.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check a client `If-None-Match` header against the server `ETag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// Returns true when the client copy is current and a 304 applies.
pub fn if_none_match_hits(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|tag| tag.trim() == etag || tag.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_quoted() {
        let etag = etag_for(b"hello");
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_stable_for_same_content() {
        assert_eq!(etag_for(b"same bytes"), etag_for(b"same bytes"));
    }

    #[test]
    fn test_etag_differs_for_different_content() {
        assert_ne!(etag_for(b"a"), etag_for(b"b"));
    }

    #[test]
    fn test_if_none_match() {
        let etag = "\"deadbeef\"";
        assert!(if_none_match_hits(Some("\"deadbeef\""), etag));
        assert!(if_none_match_hits(Some("\"other\", \"deadbeef\""), etag));
        assert!(if_none_match_hits(Some("*"), etag));
        assert!(!if_none_match_hits(Some("\"stale\""), etag));
        assert!(!if_none_match_hits(None, etag));
    }
}
