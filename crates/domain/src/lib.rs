//! dnstoy domain layer
pub mod cache_entry;
pub mod config;
pub mod dns_question;
pub mod errors;
pub mod record_type;

pub use cache_entry::CacheEntry;
pub use config::{
    CliOverrides, Config, ConfigError, DatabaseConfig, DnsConfig, LogFormat, LoggingConfig,
    ResolverKind, ServerConfig,
};
pub use dns_question::{validate_domain, DnsQuestion};
pub use errors::DomainError;
pub use record_type::RecordType;
