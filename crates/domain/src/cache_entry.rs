use std::net::{IpAddr, Ipv4Addr};

/// A row of the `resolutions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub domain: String,
    pub address: String,
    pub query_count: u64,
}

impl CacheEntry {
    pub fn new(domain: impl Into<String>, address: impl Into<String>, query_count: u64) -> Self {
        Self {
            domain: domain.into(),
            address: address.into(),
            query_count,
        }
    }

    /// The stored address, or `None` when it is not a valid IP literal.
    pub fn ip(&self) -> Option<IpAddr> {
        self.address.trim().parse().ok()
    }

    /// The stored address when it can back an `A` answer.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.ip()? {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        }
    }
}
