#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    Answer(Ipv4Addr),
    /// NOERROR with an empty answer section.
    Empty,
    NxDomain,
    ServFail,
    /// Reads queries, never replies.
    Silent,
    /// One reply carrying the wrong ID, then the real one.
    WrongIdFirst(Ipv4Addr),
    /// Echoes the query ID followed by bytes that do not decode.
    Garbage,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        seen.fetch_add(1, Ordering::SeqCst);

                        let Ok(query) = Message::from_vec(&buf[..len]) else { continue };
                        for reply in Self::replies(&query, behavior) {
                            let _ = socket.send_to(&reply, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn replies(query: &Message, behavior: MockBehavior) -> Vec<Vec<u8>> {
        let id = query.id();
        let reply = |rcode, answer| encode(&response(query, id, rcode, answer));

        match behavior {
            MockBehavior::Silent => vec![],
            MockBehavior::Answer(ip) => vec![reply(ResponseCode::NoError, Some(ip))],
            MockBehavior::Empty => vec![reply(ResponseCode::NoError, None)],
            MockBehavior::NxDomain => vec![reply(ResponseCode::NXDomain, None)],
            MockBehavior::ServFail => vec![reply(ResponseCode::ServFail, None)],
            MockBehavior::WrongIdFirst(ip) => vec![
                encode(&response(
                    query,
                    id.wrapping_add(1),
                    ResponseCode::NoError,
                    Some(Ipv4Addr::new(6, 6, 6, 6)),
                )),
                reply(ResponseCode::NoError, Some(ip)),
            ],
            MockBehavior::Garbage => {
                let [hi, lo] = id.to_be_bytes();
                vec![vec![hi, lo, 0xFF, 0xFF, 0xFF]]
            }
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn response(query: &Message, id: u16, rcode: ResponseCode, answer: Option<Ipv4Addr>) -> Message {
    let mut message = Message::new(id, MessageType::Response, query.op_code());
    message.set_recursion_desired(query.recursion_desired());
    message.set_recursion_available(true);
    message.set_response_code(rcode);

    for q in query.queries() {
        message.add_query(q.clone());
        if let Some(ip) = answer {
            message.add_answer(Record::from_rdata(q.name().clone(), 60, RData::A(A(ip))));
        }
    }
    message
}

fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}
