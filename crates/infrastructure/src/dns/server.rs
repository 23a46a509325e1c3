use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper};
use dnstoy_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use dnstoy_domain::DnsQuestion;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::sync::Arc;
use tracing::{debug, error};

/// TTL on every synthesized `A` answer, in seconds.
pub const ANSWER_TTL: u32 = 60;

const HEADER_LEN: usize = 12;

/// Turns one client datagram into one reply datagram.
///
/// Every question in the request is answered independently; questions that
/// produce no address contribute no answer record but never fail the message.
pub struct DnsMessageHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsMessageHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// `None` means nothing should be sent back.
    pub async fn handle_raw(&self, query_buf: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query_buf) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = query_buf.len(), "Undecodable DNS message");
                return format_error_reply(query_buf);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(id = request.id(), "Ignoring DNS response sent to the proxy");
            return None;
        }

        let response = self.handle_message(&request).await;

        match MessageBuilder::serialize_message(&response) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(id = request.id(), error = %e, "Failed to encode DNS reply");
                None
            }
        }
    }

    pub async fn handle_message(&self, request: &Message) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        response.set_response_code(ResponseCode::NoError);

        for query in request.queries() {
            response.add_query(query.clone());

            let question = DnsQuestion::new(
                &query.name().to_utf8(),
                RecordTypeMapper::from_hickory(query.query_type()),
            );

            let outcome = self.use_case.execute(&question).await;
            debug!(domain = %question.domain, outcome = ?outcome, "Question handled");

            if let QueryOutcome::Answered { address, .. } = outcome {
                response.add_answer(Record::from_rdata(
                    query.name().clone(),
                    ANSWER_TTL,
                    RData::A(A(address)),
                ));
            }
        }

        response
    }
}

/// FORMERR header echoing the request ID, opcode and RD bit. Datagrams
/// shorter than a header carry no ID to echo and get no reply.
fn format_error_reply(query_buf: &[u8]) -> Option<Vec<u8>> {
    if query_buf.len() < HEADER_LEN {
        return None;
    }

    let mut reply = vec![0u8; HEADER_LEN];
    reply[0] = query_buf[0];
    reply[1] = query_buf[1];
    // QR=1, opcode and RD copied, AA/TC cleared
    reply[2] = 0x80 | (query_buf[2] & 0x79);
    // RA=1, RCODE=FORMERR
    reply[3] = 0x80 | (u16::from(ResponseCode::FormErr) & 0x0F) as u8;
    Some(reply)
}
