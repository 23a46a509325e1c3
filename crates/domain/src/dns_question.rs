use super::{DomainError, RecordType};
use std::sync::Arc;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// One entry of a message's question section, with the name already
/// normalized into its cache key form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuestion {
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: Self::normalize_name(domain).into(),
            record_type,
        }
    }

    /// Lower-cases and makes the name fully qualified. The root name and the
    /// empty string both become `"."`.
    pub fn normalize_name(name: &str) -> String {
        let trimmed = name.trim();
        let mut normalized = trimmed.to_ascii_lowercase();
        if !normalized.ends_with('.') {
            normalized.push('.');
        }
        normalized
    }
}

/// Rejects names that can never be resolved: empty or root-only names,
/// empty labels, labels over 63 bytes, names over 253 bytes, and names with
/// whitespace or control characters.
pub fn validate_domain(domain: &str) -> Result<(), DomainError> {
    let name = domain.strip_suffix('.').unwrap_or(domain);

    if name.is_empty() {
        return Err(DomainError::InvalidDomain(format!("'{}' has no labels", domain)));
    }
    if name.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::InvalidDomain(format!(
            "name is {} bytes, limit is {}",
            name.len(),
            MAX_DOMAIN_LEN
        )));
    }
    for label in name.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomain(format!("bad label length in '{}'", domain)));
        }
        if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::InvalidDomain(format!("illegal character in '{}'", domain)));
        }
    }
    Ok(())
}
