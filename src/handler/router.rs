//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! resolution, dispatch to the file responder, and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating the headers the file responder needs
pub struct RequestContext {
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Resolution consults the rule table and the filesystem, the file
/// responder transfers the bytes, and one access-log line wraps the
/// completed response.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();

    // The raw target keeps the query string; the resolver strips it.
    let raw_target = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path(), |pq| pq.as_str());

    let (response, effective_path) = match check_http_method(method) {
        Some(resp) => (resp, raw_target.to_string()),
        None => {
            let effective_path = routing::resolve(raw_target, &state.rules, &state.root);

            let ctx = RequestContext {
                is_head: *method == Method::HEAD,
                if_none_match: header_value(&req, "if-none-match"),
                range_header: header_value(&req, "range"),
            };

            let response = static_files::serve(&ctx, &state, &effective_path).await;
            (response, effective_path)
        }
    };

    // Observational only; the response is already built.
    if state.config.logging.access_log {
        logger::log_access(&AccessLogEntry {
            method: method.to_string(),
            target: raw_target.to_string(),
            http_version: format!("{:?}", req.version()),
            status: response.status().as_u16(),
            effective_path,
        });
    }

    Ok(response)
}

/// Check HTTP method and return the short-circuit response for non-GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
