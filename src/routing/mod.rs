//! Request routing module
//!
//! Implements the hosting-provider routing semantics: exact-match rewrite
//! rules loaded from a rules file, and clean-URL resolution of incoming
//! request paths against the document root.

pub mod resolve;
pub mod rewrite;

pub use resolve::resolve;
pub use rewrite::RuleTable;
