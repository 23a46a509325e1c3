use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::database::DatabaseConfig;
use super::dns::{DnsConfig, ResolverKind};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "dnstoy.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnstoy/config.toml";

/// Main configuration structure for dnstoy
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolution configuration
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cache database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnstoy.toml in current directory
    /// 3. /etc/dnstoy/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(local_dns) = overrides.local_dns {
            self.server.local_dns = local_dns;
        }
        if let Some(upstream) = overrides.upstream_server {
            self.dns.upstream_server = upstream;
        }
        if let Some(resolver) = overrides.resolver {
            self.dns.resolver = resolver;
        }
        if overrides.disable_lookups {
            self.dns.lookups_enabled = false;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.dns.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        if self.dns.resolver == ResolverKind::Upstream
            && self.dns.upstream_server.parse::<SocketAddr>().is_err()
        {
            return Err(ConfigError::Validation(format!(
                "Upstream server '{}' is not a socket address (ip:port)",
                self.dns.upstream_server
            )));
        }

        if self.database.write_pool_max_connections == 0
            || self.database.read_pool_max_connections == 0
        {
            return Err(ConfigError::Validation(
                "Database pools need at least one connection".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, toml_string).map_err(|e| ConfigError::FileWrite {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub local_dns: Option<String>,
    pub upstream_server: Option<String>,
    pub resolver: Option<ResolverKind>,
    pub disable_lookups: bool,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
