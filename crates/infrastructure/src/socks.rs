use dns_repeater_domain::DomainError;
use fast_socks5::server::{run_tcp_proxy, DnsResolveHelper as _, Socks5ServerProtocol};
use fast_socks5::{ReplyError, Socks5Command};
use std::fmt::Display;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// SOCKSv5 proxy served from the same process as the DNS front-end.
///
/// Only CONNECT without authentication is offered. Target hostnames are
/// resolved here, so they see the same namespace as DNS queries do.
pub struct Socks5Proxy {
    request_timeout_secs: u64,
}

impl Socks5Proxy {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            request_timeout_secs: request_timeout.as_secs().max(1),
        }
    }

    pub async fn serve(&self, listener: TcpListener) -> Result<(), DomainError> {
        let local_addr = listener.local_addr().map_err(transport_error)?;
        info!(bind_address = %local_addr, "SOCKS5 proxy ready");

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Failed to accept SOCKS connection");
                    continue;
                }
            };

            let timeout = self.request_timeout_secs;
            tokio::spawn(async move {
                if let Err(e) = handle_session(stream, timeout).await {
                    debug!(client = %peer, error = %e, "SOCKS session ended");
                }
            });
        }
    }
}

async fn handle_session(stream: TcpStream, timeout_secs: u64) -> Result<(), DomainError> {
    let (proto, command, target) = Socks5ServerProtocol::accept_no_auth(stream)
        .await
        .map_err(transport_error)?
        .read_command()
        .await
        .map_err(transport_error)?
        .resolve_dns()
        .await
        .map_err(transport_error)?;

    match command {
        Socks5Command::TCPConnect => {
            debug!(destination = ?target, "SOCKS CONNECT");
            run_tcp_proxy(proto, &target, Duration::from_secs(timeout_secs), false)
                .await
                .map_err(transport_error)?;
            Ok(())
        }
        other => {
            proto
                .reply_error(&ReplyError::CommandNotSupported)
                .await
                .map_err(transport_error)?;
            Err(DomainError::Transport(format!(
                "unsupported SOCKS command {:?}",
                other
            )))
        }
    }
}

fn transport_error(e: impl Display) -> DomainError {
    DomainError::Transport(e.to_string())
}
