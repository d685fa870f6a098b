//! Static file responder module
//!
//! Maps resolved paths onto the document root and transfers file bytes
//! with content type, ETag, and byte-range support. Produces the 404
//! outcome for anything the filesystem cannot back.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the resolved path from the document root.
pub async fn serve(
    ctx: &RequestContext,
    state: &AppState,
    resolved_path: &str,
) -> Response<Full<Bytes>> {
    match load(&state.root, resolved_path, &state.config.site.index_files).await {
        Some((content, content_type)) => build_static_file_response(&content, content_type, ctx),
        None => http::build_404_response(),
    }
}

/// Load the file backing a resolved path, with index-file support for
/// directory requests.
async fn load(
    root: &Path,
    resolved_path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let relative = resolved_path.trim_start_matches('/');
    let mut file_path = root.join(relative);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Directory request: try index files in configured order
    if file_path.is_dir() || relative.is_empty() || relative.ends_with('/') {
        file_path = pick_index_file(&file_path, index_files)?;
    }

    // A path that does not canonicalize is the common 404; stays quiet
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {resolved_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(&canonical);
    Some((content, content_type))
}

/// First existing index file under a directory, if any.
fn pick_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Build the transfer response: conditional-request check first, then
/// range evaluation, then the full body.
fn build_static_file_response(
    data: &[u8],
    content_type: &'static str,
    ctx: &RequestContext,
) -> Response<Full<Bytes>> {
    let etag = cache::etag_for(data);
    let total_size = data.len();

    if cache::if_none_match_hits(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data[range.start..=range.end].to_vec())
            };
            http::response::build_partial_response(
                body,
                content_type,
                &etag,
                range.start,
                range.end,
                total_size,
                ctx.is_head,
            )
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::from(data.to_owned())
            };
            http::response::build_file_response(body, content_type, &etag, ctx.is_head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::PathBuf;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("siteserve-static-{name}-{}", std::process::id()));
        std_fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    #[tokio::test]
    async fn test_load_plain_file() {
        let root = temp_root("plain");
        std_fs::write(root.join("about.html"), "<html>about</html>").unwrap();

        let (content, content_type) = load(&root, "/about.html", &index_files()).await.unwrap();
        assert_eq!(content, b"<html>about</html>");
        assert_eq!(content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let root = temp_root("missing");
        assert!(load(&root, "/nope.html", &index_files()).await.is_none());
    }

    #[tokio::test]
    async fn test_directory_request_serves_index() {
        let root = temp_root("dir-index");
        std_fs::create_dir_all(root.join("docs")).unwrap();
        std_fs::write(root.join("docs/index.html"), "docs index").unwrap();

        let (content, _) = load(&root, "/docs/", &index_files()).await.unwrap();
        assert_eq!(content, b"docs index");
    }

    #[tokio::test]
    async fn test_root_request_serves_index() {
        let root = temp_root("root-index");
        std_fs::write(root.join("index.html"), "home").unwrap();

        let (content, _) = load(&root, "/", &index_files()).await.unwrap();
        assert_eq!(content, b"home");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_none() {
        let root = temp_root("dir-no-index");
        std_fs::create_dir_all(root.join("empty")).unwrap();

        assert!(load(&root, "/empty/", &index_files()).await.is_none());
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        let root = temp_root("traversal").join("site");
        std_fs::create_dir_all(&root).unwrap();
        // A real file one level above the document root
        let secret = root.parent().unwrap().join("secret.txt");
        std_fs::write(&secret, "secret").unwrap();

        assert!(load(&root, "/../secret.txt", &index_files()).await.is_none());
    }

    #[test]
    fn test_head_request_has_empty_body() {
        let ctx = RequestContext {
            is_head: true,
            if_none_match: None,
            range_header: None,
        };
        let resp = build_static_file_response(b"content", "text/plain; charset=utf-8", &ctx);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "7");
    }

    #[test]
    fn test_if_none_match_yields_304() {
        let data = b"cached content";
        let etag = cache::etag_for(data);
        let ctx = RequestContext {
            is_head: false,
            if_none_match: Some(etag),
            range_header: None,
        };
        let resp = build_static_file_response(data, "text/plain; charset=utf-8", &ctx);
        assert_eq!(resp.status(), 304);
    }

    #[test]
    fn test_range_request_yields_206() {
        let ctx = RequestContext {
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=0-4".to_string()),
        };
        let resp = build_static_file_response(b"0123456789", "text/plain; charset=utf-8", &ctx);
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-4/10");
    }

    #[test]
    fn test_unsatisfiable_range_yields_416() {
        let ctx = RequestContext {
            is_head: false,
            if_none_match: None,
            range_header: Some("bytes=100-".to_string()),
        };
        let resp = build_static_file_response(b"short", "text/plain; charset=utf-8", &ctx);
        assert_eq!(resp.status(), 416);
    }
}
