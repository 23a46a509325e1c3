use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Address clients are expected to use for this proxy. Only reported at
    /// startup; the proxy never edits the host's resolver settings.
    #[serde(default = "default_local_dns")]
    pub local_dns: String,

    /// How long in-flight queries may keep running after shutdown starts.
    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl ServerConfig {
    pub fn listen_address(&self) -> String {
        if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, self.dns_port)
        } else {
            format!("{}:{}", self.bind_address, self.dns_port)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            local_dns: default_local_dns(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_local_dns() -> String {
    "127.0.0.1".to_string()
}

fn default_shutdown_grace_ms() -> u64 {
    500
}
