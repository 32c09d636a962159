#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use hashkeep::{HashService, ShutdownSignal};
use server::config::{CliArgs, ServerConfig};
use server::routes::AppState;
use server::run::serve;
use server::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry(config.log_format)?;

    let listener = TcpListener::bind(config.server_addr).await?;
    log_startup_info(&config);
    run_server(listener, config).await
}

async fn run_server(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let shutdown = ShutdownSignal::new();
    let state = AppState::new(HashService::new(config.delay), shutdown.clone());

    tokio::spawn(forward_os_signals(shutdown));
    serve(listener, state, config.shutdown_grace).await
}

fn log_startup_info(config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting digest service on {} with full config: {:#?}",
            config.server_addr,
            config
        );
    } else {
        tracing::info!(
            "Starting digest service on {} with a {:?} delay",
            config.server_addr,
            config.delay
        );
    }
}

/// Fires `shutdown` on Ctrl+C or SIGTERM. Returns early if something else
/// fires it first.
async fn forward_os_signals(shutdown: ShutdownSignal) {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
        () = shutdown.wait() => return,
    }

    shutdown.trigger();
}

