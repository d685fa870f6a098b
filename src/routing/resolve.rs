//! Request path resolution module
//!
//! Decides which path should actually be served for an incoming request,
//! emulating hosting-provider clean URLs: rewrite rules first, then `.html`
//! extension inference, then the literal path unchanged.

use std::path::Path;

use super::rewrite::RuleTable;

/// Resolve a raw request target to the path the file responder should serve.
///
/// Resolution order is strict:
///
/// 1. Strip everything at and after the first `?` or `#`.
/// 2. Exact rewrite-rule lookup. A hit short-circuits resolution and is
///    returned as-is, whether or not the target exists on disk (a missing
///    target is a downstream 404, not a resolver concern).
/// 3. If the last path segment has no `.` and the path has no trailing `/`,
///    and `<path>.html` is a regular file under the document root, serve
///    `<path>.html`.
/// 4. Otherwise the path is passed through unchanged.
///
/// The resolver performs at most one table lookup and one filesystem
/// existence check per request, and never mutates the filesystem.
pub fn resolve(raw_target: &str, rules: &RuleTable, document_root: &Path) -> String {
    let clean = match raw_target.find(['?', '#']) {
        Some(i) => &raw_target[..i],
        None => raw_target,
    };

    if let Some(target) = rules.lookup(clean) {
        return target.to_string();
    }

    if wants_html_inference(clean) {
        let candidate = document_root.join(format!("{}.html", clean.trim_start_matches('/')));
        if candidate.is_file() {
            return format!("{clean}.html");
        }
    }

    clean.to_string()
}

/// Extension inference applies to extension-less paths that are not
/// explicit directory requests.
fn wants_html_inference(clean: &str) -> bool {
    if clean.ends_with('/') {
        return false;
    }
    let basename = clean.rfind('/').map_or(clean, |i| &clean[i + 1..]);
    !basename.contains('.')
}
