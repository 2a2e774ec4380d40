//! Heroes proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                   HEROES PROXY                    │
//!                     │                                                   │
//!   GET /heroes       │  ┌────────┐   ┌───────────────┐   ┌────────────┐  │
//!   GET /heroes/{id}  │  │  http  │──▶│ Authenticator │──▶│  upstream  │──┼──▶ POST /auth
//!  ───────────────────┼─▶│ server │   └───────────────┘   │   client   │  │
//!                     │  │        │   ┌───────────────┐   │            │──┼──▶ GET /heroes[/{id}]
//!                     │  │        │──▶│  HeroService  │──▶│            │  │
//!  ◀──────────────────┼──│        │   └───────┬───────┘   │            │──┼──▶ GET /heroes/{id}/profile
//!                     │  └────────┘           ▼           │            │  │       (fan-out)
//!                     │               ┌───────────────┐   │            │  │
//!                     │               │  Aggregator   │──▶│            │  │
//!                     │               └───────────────┘   └────────────┘  │
//!                     │                                                   │
//!                     │   config · observability · lifecycle             │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use heroes_proxy::config::{self, ProxyConfig};
use heroes_proxy::lifecycle::{wait_for_signal, Shutdown};
use heroes_proxy::observability::{logging, metrics};
use heroes_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "heroes-proxy")]
#[command(about = "HTTP proxy for the heroes catalog with authenticated profile enrichment", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ProxyConfig::default(),
    };
    config::apply_env_overrides(&mut config);
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    let config = config::finalize(config)?;

    logging::init_logging(&config.observability);

    tracing::info!("heroes-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.host,
        data_scheme = %config.upstream.data_scheme,
        auth_scheme = %config.upstream.auth_scheme,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
