//! IB FLIX Server — application entry point.

use clap::Parser;
use ibflix_db::{DbManager, run_migrations};
use ibflix_server::shutdown::shutdown_signal;
use ibflix_server::{AppState, Cli, LogFormat};
use tracing_subscriber::EnvFilter;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("ibflix=info,ibflix_server=info,ibflix_db=info,ibflix_access=info")
    });

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    tracing::info!("Starting IB FLIX server...");

    let db = DbManager::connect(&cli.db_config()).await?;
    run_migrations(db.client()).await?;

    let access_config = cli.access_config();
    tracing::info!(
        default_role = %access_config.default_role,
        audit_default_limit = access_config.audit_default_limit,
        audit_max_limit = access_config.audit_max_limit,
        "Access services configured"
    );
    let state = AppState::new(db.client(), access_config);

    tracing::info!("IB FLIX server ready");
    shutdown_signal().await;

    drop(state);
    tracing::info!("IB FLIX server stopped.");
    Ok(())
}
