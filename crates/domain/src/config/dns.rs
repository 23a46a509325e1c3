use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which adapter answers cache misses.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Explicit A query to `upstream_server` over UDP.
    #[default]
    Upstream,

    /// The operating system's resolver.
    System,
}

impl ResolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upstream" => Ok(Self::Upstream),
            "system" => Ok(Self::System),
            other => Err(format!("unknown resolver '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default = "default_upstream_server")]
    pub upstream_server: String,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default)]
    pub resolver: ResolverKind,

    /// Initial state of the lookup toggle.
    #[serde(default = "default_true")]
    pub lookups_enabled: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_server: default_upstream_server(),
            query_timeout_ms: default_query_timeout_ms(),
            resolver: ResolverKind::default(),
            lookups_enabled: true,
        }
    }
}

fn default_upstream_server() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

fn default_true() -> bool {
    true
}
