//! DNS Message Builder
//!
//! Constructs upstream query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dnstoy_domain::{DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query (RD set, single IN question, random ID) and
    /// return the ID alongside the wire bytes for response matching.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomain(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(hickory_proto::rr::DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::UpstreamUnavailable(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_a_query() {
        let (_, bytes) =
            MessageBuilder::build_query_with_id("example.com.", &RecordType::A).unwrap();

        // header is 12 bytes, plus the question section
        assert!(bytes.len() > 12, "DNS message too short: {} bytes", bytes.len());
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
        assert_eq!(bytes[2] & 0x80, 0x00, "QR flag must be clear on a query");
        assert_eq!(&bytes[4..6], &[0x00, 0x01], "exactly one question");
    }

    #[test]
    fn test_build_query_with_id() {
        let (id, bytes) = MessageBuilder::build_query_with_id("test.com.", &RecordType::A).unwrap();

        let wire_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        assert_eq!(wire_id, id, "Wire ID should match returned ID");
    }

    #[test]
    fn test_question_type_is_a() {
        let (_, bytes) =
            MessageBuilder::build_query_with_id("example.com.", &RecordType::A).unwrap();
        let message = Message::from_vec(&bytes).unwrap();

        let query = &message.queries()[0];
        assert_eq!(query.query_type(), hickory_proto::rr::RecordType::A);
        assert_eq!(query.name().to_utf8(), "example.com.");
    }
}
