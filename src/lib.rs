//! siteserve: local preview server for static sites.
//!
//! Serves a document root over HTTP/1.1 while emulating a hosting
//! provider's routing: a `_redirects`-style rules file remaps exact paths,
//! and extension-less clean URLs transparently resolve to `.html` files,
//! so a statically hosted site previews locally with its production
//! routing semantics.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
