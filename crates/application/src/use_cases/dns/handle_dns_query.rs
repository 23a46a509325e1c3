use crate::ports::{CacheStore, UpstreamResolver};
use crate::services::LookupPolicy;
use dnstoy_domain::{validate_domain, DnsQuestion, DomainError};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Cache,
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoAnswerReason {
    InvalidDomain(DomainError),
    /// The cached row exists but its address cannot back an `A` record.
    InvalidCachedAddress(String),
    StorageFailure(DomainError),
    LookupsDisabled,
    ResolutionFailed(DomainError),
}

/// Terminal state of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Not an `A` question; neither the cache nor the resolver was touched.
    Skipped,
    Answered {
        address: Ipv4Addr,
        source: AnswerSource,
    },
    NoAnswer(NoAnswerReason),
}

impl QueryOutcome {
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Answered { address, .. } => Some(*address),
            _ => None,
        }
    }
}

pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn CacheStore>,
    resolver: Arc<dyn UpstreamResolver>,
    policy: Arc<LookupPolicy>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        resolver: Arc<dyn UpstreamResolver>,
        policy: Arc<LookupPolicy>,
    ) -> Self {
        Self {
            cache,
            resolver,
            policy,
        }
    }

    pub async fn execute(&self, question: &DnsQuestion) -> QueryOutcome {
        if !question.record_type.is_address() {
            debug!(
                domain = %question.domain,
                record_type = %question.record_type,
                "Skipping non-A question"
            );
            return QueryOutcome::Skipped;
        }

        let domain = question.domain.as_ref();

        if let Err(e) = validate_domain(domain) {
            debug!(domain = %domain, error = %e, "Rejecting malformed question name");
            return QueryOutcome::NoAnswer(NoAnswerReason::InvalidDomain(e));
        }

        match self.cache.get(domain).await {
            Ok(Some(entry)) => {
                let Some(address) = entry.ipv4() else {
                    warn!(
                        domain = %domain,
                        address = %entry.address,
                        "Cached address is not a valid IPv4 literal"
                    );
                    return QueryOutcome::NoAnswer(NoAnswerReason::InvalidCachedAddress(
                        entry.address,
                    ));
                };

                if let Err(e) = self.cache.increment_and_check(domain, &entry.address).await {
                    warn!(domain = %domain, error = %e, "Failed to count repeat query");
                }

                debug!(domain = %domain, address = %address, "Cache hit");
                QueryOutcome::Answered {
                    address,
                    source: AnswerSource::Cache,
                }
            }
            Ok(None) => self.resolve_miss(domain).await,
            Err(e) => {
                warn!(domain = %domain, error = %e, "Cache lookup failed");
                QueryOutcome::NoAnswer(NoAnswerReason::StorageFailure(e))
            }
        }
    }

    async fn resolve_miss(&self, domain: &str) -> QueryOutcome {
        if !self.policy.is_enabled() {
            debug!(domain = %domain, "Cache miss with lookups disabled");
            return QueryOutcome::NoAnswer(NoAnswerReason::LookupsDisabled);
        }

        let start = Instant::now();
        let address = match self.resolver.resolve(domain).await {
            Ok(address) => address,
            Err(e) => {
                warn!(
                    domain = %domain,
                    upstream = %self.resolver.describe(),
                    kind = e.kind(),
                    error = %e,
                    "Error resolving the domain"
                );
                return QueryOutcome::NoAnswer(NoAnswerReason::ResolutionFailed(e));
            }
        };

        match self
            .cache
            .increment_and_check(domain, &address.to_string())
            .await
        {
            Ok(false) => info!(
                domain = %domain,
                address = %address,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "New domain added to the cache"
            ),
            Ok(true) => debug!(
                domain = %domain,
                "Domain was cached by a concurrent query, counted as a repeat"
            ),
            Err(e) => warn!(
                domain = %domain,
                address = %address,
                error = %e,
                "Error storing resolved address in the cache"
            ),
        }

        QueryOutcome::Answered {
            address,
            source: AnswerSource::Upstream,
        }
    }
}
