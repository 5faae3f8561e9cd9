//! Image relay (v1)
//!
//! ```text
//!   Browser ──GET /proxy-image?url=…──▶ ┌──────────────────────────────┐
//!                                       │          IMAGE RELAY          │
//!                                       │ request id → trace → CORS    │
//!                                       │   → timeout → relay_image    │
//!                                       │        │                     │
//!                                       │   UrlPolicy → UpstreamClient ─┼──▶ Upstream
//!   Browser ◀──200 image/png + ACAO *── │        ◀── bytes ◀───────────┼─── image host
//!                                       └──────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use image_relay::config;
use image_relay::lifecycle::{signals, Shutdown};
use image_relay::observability::{logging, metrics};
use image_relay::HttpServer;

#[derive(Parser)]
#[command(name = "image-relay", version)]
#[command(about = "Same-origin relay for remote images", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port. Overrides the config file and PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::resolve(cli.config.as_deref(), cli.port, |key| std::env::var(key).ok())?;

    logging::init(&config.observability)?;

    tracing::info!("image-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.server.port,
        upstream_timeout_secs = config.upstream.timeout_secs,
        max_body_bytes = config.upstream.max_body_bytes,
        allowed_hosts = ?config.upstream.allowed_hosts,
        content_type = ?config.response.content_type,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!(address = %listener.local_addr()?, "Proxy server listening");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
