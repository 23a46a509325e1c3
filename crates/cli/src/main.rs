use clap::Parser;
use dnstoy_domain::{CliOverrides, ResolverKind};
use std::time::Duration;
use tracing::{error, info};

mod bootstrap;
mod console;
mod di;
mod server;

use console::AdminConsole;

#[derive(Parser)]
#[command(name = "dnstoy")]
#[command(version)]
#[command(about = "dnstoy - caching DNS proxy with an operator console")]
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

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Upstream DNS server (ip:port)
    #[arg(long = "udns", value_name = "ADDR")]
    upstream: Option<String>,

    /// Local DNS address clients should use (informational)
    #[arg(long = "dns", value_name = "ADDR")]
    local_dns: Option<String>,

    /// Resolver for cache misses (upstream, system)
    #[arg(long)]
    resolver: Option<ResolverKind>,

    /// Start with upstream lookups disabled
    #[arg(long)]
    no_lookups: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        local_dns: cli.local_dns.clone(),
        upstream_server: cli.upstream.clone(),
        resolver: cli.resolver,
        disable_lookups: cli.no_lookups,
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    bootstrap::init_logging(&config);

    info!("Starting dnstoy v{}", env!("CARGO_PKG_VERSION"));

    let (write_pool, read_pool) = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(write_pool.clone(), read_pool.clone());
    let dns_services = di::DnsServices::new(&config, &repos)?;
    let use_cases = di::UseCases::new(&repos);

    let shutdown = bootstrap::create_shutdown_token();

    info!(
        local_dns = %config.server.local_dns,
        "Clients should send queries to the local DNS address"
    );

    let dns_addr = config.server.listen_address();
    let grace = Duration::from_millis(config.server.shutdown_grace_ms);
    let dns_task = tokio::spawn(server::start_dns_server(
        dns_addr,
        dns_services.handler.clone(),
        shutdown.clone(),
        grace,
    ));

    let console = AdminConsole::new(
        dns_services.policy.clone(),
        use_cases,
        dns_services.resolver.describe(),
        shutdown.clone(),
    );
    let console_input = console::spawn_stdin_reader();
    tokio::spawn(async move {
        if let Err(e) = console.run(console_input, tokio::io::stdout()).await {
            error!(error = %e, "Console stopped");
        }
    });

    let result = dns_task.await?;
    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
    }

    shutdown.cancel();
    write_pool.close().await;
    read_pool.close().await;

    info!("Server shutdown complete");
    result
}
