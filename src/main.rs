//! Reelgate wrapper server binary
//!
//! Resolves configuration, builds the selected backend and a session, and
//! serves the game-facing HTTP facade.

use clap::Parser;
use reelgate::api::{ApiConfig, ApiServer};
use reelgate::{build_backend, BackendMode, Session, WrapperConfig};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "reelgate")]
#[command(about = "Game wrapper bridge server", long_about = None)]
struct Args {
    /// Facade host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Facade port
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Wrapper configuration file (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Force mock mode regardless of the config file
    #[arg(long)]
    mock: bool,

    /// Remote backend base URL; implies remote mode
    #[arg(long)]
    backend_url: Option<String>,

    /// Prize table document for mock mode
    #[arg(long)]
    prize_table: Option<String>,

    /// Allowed CORS origins (comma-separated, use * for all)
    #[arg(long, default_value = "*")]
    cors_origins: String,

    /// Facade request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelgate=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WrapperConfig::load(path)?,
        None => WrapperConfig::demo(),
    };
    if let Some(url) = args.backend_url {
        config.backend.mode = BackendMode::Remote;
        config.backend.base_url = url;
    }
    if args.mock {
        config.backend.mode = BackendMode::Mock;
    }
    if args.prize_table.is_some() {
        config.backend.prize_table_path = args.prize_table;
    }
    config.validate()?;

    info!(mode = ?config.backend.mode, "starting wrapper bridge");

    let backend = build_backend(&config)?;
    let session = Arc::new(Session::new(backend, &config));

    let api_config = ApiConfig {
        host: args.host,
        port: args.port,
        allowed_origins: args
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect(),
        request_timeout_secs: args.timeout,
    };

    ApiServer::new(api_config, session).run().await?;
    Ok(())
}
