use anyhow::{Context, Result};
use clap::Parser;
use kanban_core::{start_server, ServerConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kanban-server", version, about = "Kanban board HTTP service")]
struct Cli {
    /// Address to bind (overrides KANBAN_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides KANBAN_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = ServerConfig::from_env().context("Failed to read server configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    info!(addr = %config.addr(), "Kanban server starting");
    start_server(config).await
}
