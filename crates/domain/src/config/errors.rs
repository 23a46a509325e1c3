use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("cannot write config file {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("invalid TOML: {0}")]
    Parse(String),

    #[error("cannot serialize configuration: {0}")]
    Serialize(String),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
