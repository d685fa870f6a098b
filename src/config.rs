// Configuration module
// Layered configuration (file, environment, defaults) and the immutable
// per-process application state shared by all connection tasks.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::routing::RuleTable;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// The site being previewed: document root, rules file, directory indexes.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Document root all resolved paths are served from
    pub root: String,
    /// Rules file path, relative to the document root
    pub rules_file: String,
    /// Index files tried for directory requests, in order
    pub index_files: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Config {
    /// Load configuration: optional `config.toml`, then `SITESERVE_*`
    /// environment variables, then defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (extension resolved by the
    /// config crate; the file is optional).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITESERVE"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 9999)?
            .set_default("site.root", ".")?
            .set_default("site.rules_file", "_redirects")?
            .set_default("site.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Immutable per-process state.
///
/// Built once in `main` before the accept loop and shared read-only by all
/// connection tasks; no request handler ever mutates it, so concurrent
/// reads need no locking.
pub struct AppState {
    pub config: Config,
    /// Document root backing all resolved paths
    pub root: PathBuf,
    /// Rewrite rules, loaded once at startup
    pub rules: RuleTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let root = PathBuf::from(&config.site.root);
        let rules = RuleTable::load(&root.join(&config.site.rules_file));

        Self {
            config,
            root,
            rules,
        }
    }
}
