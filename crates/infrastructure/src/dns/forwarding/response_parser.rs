use dnstoy_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    /// A-record addresses from the answer section, in wire order.
    pub addresses: Vec<Ipv4Addr>,

    pub rcode: ResponseCode,
}

impl DnsResponse {
    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses.first().copied()
    }

    pub fn is_server_error(&self) -> bool {
        !matches!(self.rcode, ResponseCode::NoError | ResponseCode::NXDomain)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::UpstreamUnavailable(format!("Malformed DNS response: {}", e))
        })?;

        let rcode = message.response_code();

        let addresses: Vec<Ipv4Addr> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect();

        debug!(rcode = ?rcode, addresses = addresses.len(), "DNS response parsed");

        Ok(DnsResponse {
            id: message.id(),
            addresses,
            rcode,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_answer(id: u16, rcode_byte: u8, answer: Option<[u8; 4]>) -> Vec<u8> {
        let mut buf = vec![
            (id >> 8) as u8,
            id as u8,
            0x81,
            0x80 | rcode_byte,
            0x00,
            0x01,
            0x00,
            if answer.is_some() { 0x01 } else { 0x00 },
            0x00,
            0x00,
            0x00,
            0x00,
        ];
        buf.extend_from_slice(b"\x07example\x03com\x00");
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        if let Some(ip) = answer {
            // Pointer to the question name, type A, class IN.
            buf.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01]);
            // TTL 60, RDLENGTH 4.
            buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x3c, 0x00, 0x04]);
            buf.extend_from_slice(&ip);
        }
        buf
    }

    #[test]
    fn test_parse_a_answer() {
        let bytes = response_with_answer(0x1234, 0, Some([93, 184, 216, 34]));
        let response = ResponseParser::parse(&bytes).unwrap();

        assert_eq!(response.id, 0x1234);
        assert_eq!(response.first_address(), Some(Ipv4Addr::new(93, 184, 216, 34)));
        assert!(!response.is_server_error());
    }

    #[test]
    fn test_parse_nxdomain() {
        let bytes = response_with_answer(7, 3, None);
        let response = ResponseParser::parse(&bytes).unwrap();

        assert_eq!(response.rcode, ResponseCode::NXDomain);
        assert!(!response.is_server_error());
        assert!(response.first_address().is_none());
        assert_eq!(ResponseParser::rcode_to_status(response.rcode), "NXDOMAIN");
    }

    #[test]
    fn test_parse_servfail_is_server_error() {
        let bytes = response_with_answer(7, 2, None);
        let response = ResponseParser::parse(&bytes).unwrap();
        assert!(response.is_server_error());
    }

    #[test]
    fn test_truncated_garbage_is_error() {
        let result = ResponseParser::parse(&[0x12, 0x34, 0x81]);
        assert!(matches!(result, Err(DomainError::UpstreamUnavailable(_))));
    }
}
