#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock upstream answers every query.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    Answer(Ipv4Addr),
    NxDomain,
    ServFail,
    /// UDP replies are empty with TC set; TCP carries the real answer.
    TruncateUdp(Ipv4Addr),
    WrongId,
    Silent,
}

#[derive(Default)]
pub struct MockCounters {
    pub udp_queries: AtomicUsize,
    pub tcp_queries: AtomicUsize,
}

/// In-process upstream DNS server listening on UDP and TCP at the same
/// loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    counters: Arc<MockCounters>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let counters = Arc::new(MockCounters::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_counters = Arc::clone(&counters);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            task_counters.udp_queries.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_response(&buf[..len], behavior, false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = listener.accept() => {
                        if let Ok((stream, _)) = result {
                            task_counters.tcp_queries.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(serve_tcp(stream, behavior));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            counters,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.counters.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.counters.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
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

async fn serve_tcp(mut stream: tokio::net::TcpStream, behavior: MockBehavior) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }

    if let Some(response) = build_response(&query, behavior, true) {
        let _ = stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await;
        let _ = stream.write_all(&response).await;
    }
}

fn build_response(query: &[u8], behavior: MockBehavior, over_tcp: bool) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;

    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_recursion_available(true);
    response.add_queries(request.queries().to_vec());

    let owner = request.queries().first()?.name().clone();

    match behavior {
        MockBehavior::Silent => return None,
        MockBehavior::NxDomain => {
            response.set_response_code(ResponseCode::NXDomain);
        }
        MockBehavior::ServFail => {
            response.set_response_code(ResponseCode::ServFail);
        }
        MockBehavior::WrongId => {
            response.set_id(request.id().wrapping_add(1));
            response.add_answer(Record::from_rdata(owner, 60, RData::A(A(Ipv4Addr::new(6, 6, 6, 6)))));
        }
        MockBehavior::Answer(ip) => {
            response.add_answer(Record::from_rdata(owner, 60, RData::A(A(ip))));
        }
        MockBehavior::TruncateUdp(ip) => {
            if over_tcp {
                response.add_answer(Record::from_rdata(owner, 60, RData::A(A(ip))));
            } else {
                response.set_truncated(true);
            }
        }
    }

    response.to_bytes().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_responds() {
        let server = MockDnsServer::start(MockBehavior::Answer(Ipv4Addr::new(10, 0, 0, 1)))
            .await
            .unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        let mut query = Message::new();
        query.set_id(0x1234);
        query.add_query(hickory_proto::op::Query::query(
            "example.com.".parse().unwrap(),
            hickory_proto::rr::RecordType::A,
        ));
        client
            .send_to(&query.to_bytes().unwrap(), server.addr())
            .await
            .unwrap();

        let mut buf = vec![0u8; 512];
        let (len, _) = client.recv_from(&mut buf).await.unwrap();
        let response = Message::from_vec(&buf[..len]).unwrap();

        assert_eq!(response.id(), 0x1234);
        assert_eq!(response.answers().len(), 1);
        assert_eq!(server.udp_queries(), 1);
    }
}
