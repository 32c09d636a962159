//! Serving loop and shutdown sequencing.
//!
//! Once the [`ShutdownSignal`](hashkeep::ShutdownSignal) in [`AppState`]
//! fires, [`serve`] stops accepting connections. It then waits up to `grace`
//! for in-flight requests, drains background jobs for up to `grace` again,
//! and returns.

use crate::server::routes::{AppState, router};
use core::time::Duration;
use std::future::IntoFuture;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, state: AppState, grace: Duration) -> anyhow::Result<()> {
    let service = state.service.clone();
    let shutdown = state.shutdown.clone();

    // Stops accepting connections once the signal fires, then waits for
    // in-flight requests to finish.
    let server = axum::serve(listener, router(state))
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.wait().await }
        })
        .into_future();

    let grace_expired = async {
        shutdown.wait().await;
        tracing::info!("Shutdown signal received, terminating gracefully...");
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        res = server => res?,
        () = grace_expired => {
            tracing::warn!("In-flight requests did not finish within {grace:?}; dropping them");
        }
    }

    let abandoned = service.drain(grace).await;
    if abandoned > 0 {
        tracing::warn!("{abandoned} digest jobs abandoned before publishing");
    }

    let stats = service.stats();
    tracing::info!(
        total = stats.total,
        average_ms = stats.average,
        "Service shut down successfully"
    );
    Ok(())
}
