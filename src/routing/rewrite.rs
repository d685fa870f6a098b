//! Rewrite rule table module
//!
//! Parses the `_redirects`-style rules file into an exact-match map from
//! source path to target path. The table is built once at startup and is
//! never mutated afterwards, so request handlers can share it without
//! synchronization.

use std::collections::HashMap;
use std::path::Path;

/// Exact-match mapping from request path to rewrite target.
///
/// One rule per line: `<source-path> <target-path> [<extra-fields>...]`.
/// Blank lines and lines starting with `#` are skipped. Any fields after
/// the target (a hosting provider's status code, for example) are ignored.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, String>,
}

impl RuleTable {
    /// Load the rule table from a rules file.
    ///
    /// A missing or unreadable file is a normal configuration meaning
    /// "no rewrites" and yields an empty table, never an error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(_) => Self::default(),
        }
    }

    /// Parse rule lines from text.
    ///
    /// Lines with fewer than two whitespace-separated fields are skipped
    /// silently; lenient parsing is intentional. Duplicate source paths
    /// resolve last-writer-wins, top to bottom.
    pub fn parse(text: &str) -> Self {
        let mut rules = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
                continue;
            };
            rules.insert(source.to_string(), target.to_string());
        }

        Self { rules }
    }

    /// Look up the rewrite target for an exact source path.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.rules.get(path).map(String::as_str)
    }

    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
