use dnstoy_infrastructure::dns::DnsMessageHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const RECV_BUFFER_SIZE: usize = 4096;

pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<DnsMessageHandler>,
    shutdown: CancellationToken,
    grace: Duration,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(bind_address = %socket_addr, "DNS server listening on UDP");

    serve_udp(socket, handler, shutdown, grace).await;
    Ok(())
}

/// Receive loop: one spawned task per datagram, replies through the shared
/// socket. Returns after cancellation once in-flight tasks finish or `grace`
/// runs out.
pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsMessageHandler>,
    shutdown: CancellationToken,
    grace: Duration,
) {
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];
    let mut in_flight: JoinSet<()> = JoinSet::new();

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => received,
        };

        match received {
            Ok((n, from)) => {
                let query = recv_buf[..n].to_vec();
                let handler = handler.clone();
                let socket = socket.clone();

                in_flight.spawn(async move {
                    if let Some(response) = handler.handle_raw(&query).await {
                        if let Err(e) = socket.send_to(&response, from).await {
                            warn!(client = %from, error = %e, "Failed to send DNS reply");
                        }
                    }
                });
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP port unreachable from an earlier reply surfaces here on some platforms
                debug!(error = %e, "UDP recv error");
            }
        }

        while in_flight.try_join_next().is_some() {}
    }

    info!(in_flight = in_flight.len(), "DNS server stopping");

    let drained = tokio::time::timeout(grace, async {
        while in_flight.join_next().await.is_some() {}
    })
    .await;

    if drained.is_err() {
        warn!(
            abandoned = in_flight.len(),
            "Grace period elapsed; abandoning in-flight queries"
        );
        in_flight.abort_all();
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
