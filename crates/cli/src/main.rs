use clap::Parser;
use dns_repeater_domain::CliOverrides;
use dns_repeater_infrastructure::dns::DnsServerHandler;
use std::time::Duration;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dns-repeater")]
#[command(version)]
#[command(about = "DNS repeater - resolves names the way a process inside the target namespace would")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// SOCKS5 proxy port
    #[arg(short = 's', long)]
    socks_port: Option<u16>,

    /// Maximum concurrent system lookups
    #[arg(long)]
    workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        socks_port: cli.socks_port,
        worker_threads: cli.workers,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    info!("Starting DNS repeater v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config);
    let dns_handler = DnsServerHandler::new(dns_services.handler_use_case);

    let socks_addr = config.socks_bind_address();
    tokio::spawn(async move {
        if let Err(e) = server::start_socks_server(socks_addr).await {
            error!(error = %e, "SOCKS server error");
        }
    });

    let tcp_timeout = Duration::from_secs(config.server.tcp_timeout_secs);
    if let Err(e) =
        server::start_dns_server(config.dns_bind_address(), dns_handler, tcp_timeout).await
    {
        error!(error = %e, "DNS server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
