use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use openclaw_shim::config::load_or_default;
use openclaw_shim::lifecycle::{signals, Shutdown};
use openclaw_shim::observability::{logging, metrics};
use openclaw_shim::ShimServer;

#[derive(Parser)]
#[command(name = "openclaw-shim")]
#[command(about = "Health-check and reverse-proxy shim in front of OpenClaw", long_about = None)]
struct Cli {
    /// Optional TOML config; built-in defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream_target(),
        health_timeout_secs = config.health_check.timeout_secs,
        proxy_timeout_secs = config.proxy.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = ShimServer::new(config);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.notified()));

    let finished = tokio::select! {
        result = &mut server_task => Some(result),
        signal = signals::shutdown_signal() => {
            let signal = signal?;
            tracing::info!(signal, "Shutdown signal received");
            shutdown.trigger();
            None
        }
    };
    let result = match finished {
        Some(result) => result,
        None => server_task.await,
    };
    result??;

    tracing::info!("Shutdown complete");
    Ok(())
}
