use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Language version checkers target when none is configured.
pub const DEFAULT_TARGET_VERSION: u32 = 11;

/// Per-invocation options for a checker group run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Options {
    /// Minor language version the checkers should assume (e.g. `11` for 1.11).
    #[serde(default = "default_target_version")]
    pub target_version: u32,

    /// Whitespace-separated `<path-glob>:<check>[,<check>...]` entries.
    #[serde(default)]
    pub ignores: String,

    /// Maximum number of checkers executing at once. 0 = one worker per CPU.
    #[serde(default)]
    pub max_concurrent_jobs: usize,

    /// Keep suppressed problems in the output, flagged as ignored.
    #[serde(default)]
    pub return_ignored: bool,

    /// Print per-checker timings after the run (stderr unless the caller
    /// hands the engine another writer).
    #[serde(default)]
    pub print_stats: bool,

    /// Configuration shared by all checkers.
    #[serde(default)]
    pub config: CheckerConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_version: DEFAULT_TARGET_VERSION,
            ignores: String::new(),
            max_concurrent_jobs: 0,
            return_ignored: false,
            print_stats: false,
            config: CheckerConfig::default(),
        }
    }
}

impl Options {
    #[must_use]
    pub const fn with_target_version(mut self, target_version: u32) -> Self {
        self.target_version = target_version;
        self
    }

    #[must_use]
    pub fn with_ignores(mut self, ignores: impl Into<String>) -> Self {
        self.ignores = ignores.into();
        self
    }

    #[must_use]
    pub const fn with_max_concurrent_jobs(mut self, jobs: usize) -> Self {
        self.max_concurrent_jobs = jobs;
        self
    }

    #[must_use]
    pub const fn with_return_ignored(mut self, return_ignored: bool) -> Self {
        self.return_ignored = return_ignored;
        self
    }

    #[must_use]
    pub const fn with_print_stats(mut self, print_stats: bool) -> Self {
        self.print_stats = print_stats;
        self
    }
}

/// Configuration blob shared read-only by every checker.
///
/// The core never interprets these values; they are forwarded to each
/// checker's `init` and `check` inside a `CheckerContext`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckerConfig {
    /// Enabled checks; `all` enables everything, a `-` prefix disables.
    #[serde(default = "default_checks")]
    pub checks: Vec<String>,

    /// Identifiers that must keep consistent casing (e.g. `ID`, `URL`).
    #[serde(default = "default_initialisms")]
    pub initialisms: Vec<String>,

    #[serde(default)]
    pub dot_import_whitelist: Vec<String>,

    #[serde(default = "default_http_status_code_whitelist")]
    pub http_status_code_whitelist: Vec<String>,

    /// Report unused exported identifiers (whole-program mode).
    #[serde(default)]
    pub check_exported: bool,

    /// Checker-specific settings not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            checks: default_checks(),
            initialisms: default_initialisms(),
            dot_import_whitelist: Vec::new(),
            http_status_code_whitelist: default_http_status_code_whitelist(),
            check_exported: false,
            extra: BTreeMap::new(),
        }
    }
}

impl CheckerConfig {
    /// Read a checker-specific setting from `extra`.
    ///
    /// Returns `None` when the key is missing or holds a value of another type.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

const fn default_target_version() -> u32 {
    DEFAULT_TARGET_VERSION
}

fn default_checks() -> Vec<String> {
    ["all", "-ST1000", "-ST1003", "-ST1016"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_initialisms() -> Vec<String> {
    [
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
        "IP", "JSON", "QPS", "RAM", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL", "UDP",
        "UI", "GID", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_http_status_code_whitelist() -> Vec<String> {
    ["200", "400", "404", "500"]
        .into_iter()
        .map(String::from)
        .collect()
}
