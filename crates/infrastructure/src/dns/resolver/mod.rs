pub mod system;
pub mod upstream;

pub use system::SystemResolver;
pub use upstream::UpstreamExchangeResolver;

use dnstoy_application::ports::UpstreamResolver;
use dnstoy_domain::{DnsConfig, DomainError, ResolverKind};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Pick the resolver adapter named by `[dns].resolver`.
pub fn build_resolver(config: &DnsConfig) -> Result<Arc<dyn UpstreamResolver>, DomainError> {
    let timeout = Duration::from_millis(config.query_timeout_ms);

    let resolver: Arc<dyn UpstreamResolver> = match config.resolver {
        ResolverKind::Upstream => {
            let server: SocketAddr = config.upstream_server.parse().map_err(|e| {
                DomainError::UpstreamUnavailable(format!(
                    "Invalid upstream server '{}': {}",
                    config.upstream_server, e
                ))
            })?;
            Arc::new(UpstreamExchangeResolver::new(server, timeout))
        }
        ResolverKind::System => Arc::new(SystemResolver::new(timeout)),
    };

    info!(
        resolver = %config.resolver,
        target = %resolver.describe(),
        timeout_ms = config.query_timeout_ms,
        "Resolver configured"
    );

    Ok(resolver)
}
