use dns_repeater_infrastructure::socks::Socks5Proxy;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

const SOCKS_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_socks_server(bind_addr: String) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let listener = TcpListener::bind(socket_addr).await?;

    Socks5Proxy::new(SOCKS_REQUEST_TIMEOUT).serve(listener).await?;
    Ok(())
}
