use super::Repositories;
use dnstoy_application::ports::UpstreamResolver;
use dnstoy_application::services::LookupPolicy;
use dnstoy_application::use_cases::HandleDnsQueryUseCase;
use dnstoy_domain::Config;
use dnstoy_infrastructure::dns::{build_resolver, DnsMessageHandler};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub resolver: Arc<dyn UpstreamResolver>,
    pub policy: Arc<LookupPolicy>,
    pub handler: Arc<DnsMessageHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, repos: &Repositories) -> anyhow::Result<Self> {
        let resolver = build_resolver(&config.dns)?;
        let policy = Arc::new(LookupPolicy::new(config.dns.lookups_enabled));

        let handle_query = Arc::new(HandleDnsQueryUseCase::new(
            repos.cache.clone(),
            resolver.clone(),
            policy.clone(),
        ));

        info!(
            lookups_enabled = policy.is_enabled(),
            "DNS services initialized"
        );

        Ok(Self {
            resolver,
            policy,
            handler: Arc::new(DnsMessageHandler::new(handle_query)),
        })
    }
}
