//! Single-question exchange with one upstream server over UDP (RFC 1035 §4.2.1).
//!
//! One socket per lookup, bound to an ephemeral port and connected to the
//! upstream so the kernel drops datagrams from other sources. Replies whose ID
//! does not match the query are discarded while the deadline lasts.

use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use dnstoy_application::ports::UpstreamResolver;
use dnstoy_domain::{validate_domain, DomainError, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UpstreamExchangeResolver {
    server: SocketAddr,
    timeout: Duration,
}

impl UpstreamExchangeResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    fn bind_address(&self) -> SocketAddr {
        if self.server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    fn unavailable(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::UpstreamUnavailable(format!("{} {}: {}", action, self.server, e))
    }

    async fn exchange(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        let (query_id, query_bytes) = MessageBuilder::build_query_with_id(domain, &RecordType::A)?;

        let socket = UdpSocket::bind(self.bind_address())
            .await
            .map_err(|e| self.unavailable("Failed to bind UDP socket for", e))?;

        socket
            .connect(self.server)
            .await
            .map_err(|e| self.unavailable("Failed to connect to", e))?;

        socket
            .send(&query_bytes)
            .await
            .map_err(|e| self.unavailable("Failed to send UDP query to", e))?;

        debug!(server = %self.server, domain = %domain, id = query_id, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let len = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| self.unavailable("Failed to receive UDP response from", e))?;

            let reply = &recv_buf[..len];
            let Some(reply_id) = wire_id(reply) else {
                warn!(server = %self.server, len, "Discarding runt upstream reply");
                continue;
            };

            if reply_id != query_id {
                warn!(
                    server = %self.server,
                    expected = query_id,
                    received = reply_id,
                    "Discarding upstream reply with mismatched ID"
                );
                continue;
            }

            // The reply is ours; a parse failure is the upstream's answer.
            let response = ResponseParser::parse(reply)?;

            debug!(
                server = %self.server,
                domain = %domain,
                rcode = ResponseParser::rcode_to_status(response.rcode),
                answers = response.addresses.len(),
                "UDP response received"
            );

            if response.is_server_error() {
                return Err(DomainError::UpstreamUnavailable(format!(
                    "{} answered {} for {}",
                    self.server,
                    ResponseParser::rcode_to_status(response.rcode),
                    domain
                )));
            }

            return response
                .first_address()
                .ok_or_else(|| DomainError::NoAddressFound(domain.to_string()));
        }
    }
}

fn wire_id(reply: &[u8]) -> Option<u16> {
    match reply {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamExchangeResolver {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        validate_domain(domain)?;

        match tokio::time::timeout(self.timeout, self.exchange(domain)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::UpstreamTimeout {
                server: self.server.to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.server)
    }
}
