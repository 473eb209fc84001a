#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

const TIMEOUT: Duration = Duration::from_secs(2);

fn build_query(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    // from_ascii keeps the caller's case.
    let name = Name::from_ascii(format!("{}.", name)).unwrap();
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(name, record_type));
    message.to_bytes().unwrap()
}

pub async fn ask_udp(server: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let id = 0x2a2a;
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.connect(server).await.unwrap();
    socket.send(&build_query(id, name, record_type)).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let len = tokio::time::timeout(TIMEOUT, socket.recv(&mut buf))
        .await
        .unwrap()
        .unwrap();
    let message = Message::from_vec(&buf[..len]).unwrap();
    assert_eq!(message.id(), id);
    message
}

pub async fn ask_tcp(server: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let id = 0x2b2b;
    let query = build_query(id, name, record_type);
    let mut stream = TcpStream::connect(server).await.unwrap();
    stream
        .write_all(&(query.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(&query).await.unwrap();

    let mut len_buf = [0u8; 2];
    tokio::time::timeout(TIMEOUT, stream.read_exact(&mut len_buf))
        .await
        .unwrap()
        .unwrap();
    let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut response).await.unwrap();

    let message = Message::from_vec(&response).unwrap();
    assert_eq!(message.id(), id);
    message
}
